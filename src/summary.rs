use crate::model::{Column, FinancialRecord, FinancialTable};

/// Fiscal years of context retained when building a completion prompt.
pub const DEFAULT_MAX_YEARS: usize = 5;

/// Serializes a bounded slice of the table for embedding in a generation
/// prompt: optionally filtered to one company (case-insensitive exact
/// match), ascending by fiscal year, keeping only the last `max_years`
/// rows, rendered as a markdown pipe table over the columns actually
/// present in the source. Output is deterministic for an unmodified table.
///
/// A company filter that matches nothing returns a plain
/// "No data found for ..." line instead of a table.
pub fn summarize_context(
    table: &FinancialTable,
    company: Option<&str>,
    max_years: usize,
) -> String {
    let mut records: Vec<&FinancialRecord> = match company {
        Some(name) => {
            let filtered = table.company_records(name);
            if filtered.is_empty() {
                return format!("No data found for {}.", name);
            }
            filtered
        }
        None => table.records().iter().collect(),
    };

    // Stable sort: company grouping order is preserved within a year.
    records.sort_by_key(|r| r.fiscal_year);
    let start = records.len().saturating_sub(max_years);
    let recent = &records[start..];

    render_table(table.columns(), recent)
}

fn render_table(columns: &[Column], records: &[&FinancialRecord]) -> String {
    let mut out = String::new();

    out.push('|');
    for column in columns {
        out.push(' ');
        out.push_str(column.header());
        out.push_str(" |");
    }
    out.push('\n');

    out.push('|');
    for _ in columns {
        out.push_str(" --- |");
    }
    out.push('\n');

    for record in records {
        out.push('|');
        for column in columns {
            out.push(' ');
            out.push_str(&render_cell(record, *column));
            out.push_str(" |");
        }
        out.push('\n');
    }

    out
}

fn render_cell(record: &FinancialRecord, column: Column) -> String {
    if column == Column::FiscalYear {
        return record.fiscal_year.to_string();
    }
    match record.value(column) {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, FinancialRecord, FinancialTable};

    fn record(company: &str, year: i32, revenue: Option<f64>) -> FinancialRecord {
        FinancialRecord {
            company: company.to_string(),
            fiscal_year: year,
            total_revenue: revenue,
            ..Default::default()
        }
    }

    fn table() -> FinancialTable {
        FinancialTable::new(
            vec![
                record("Tesla", 2019, Some(100.0)),
                record("Tesla", 2020, Some(200.0)),
                record("Tesla", 2021, Some(400.0)),
                record("Tesla", 2022, Some(800.0)),
                record("Apple", 2021, Some(900.0)),
            ],
            &[Column::FiscalYear, Column::TotalRevenue],
        )
    }

    #[test]
    fn test_summary_bounded_and_ascending() {
        let summary = summarize_context(&table(), Some("tesla"), 2);
        let data_rows: Vec<&str> = summary
            .lines()
            .skip(2)
            .collect();
        assert_eq!(data_rows.len(), 2);
        assert!(data_rows[0].starts_with("| 2021 |"));
        assert!(data_rows[1].starts_with("| 2022 |"));
    }

    #[test]
    fn test_summary_without_company_keeps_all_companies() {
        let summary = summarize_context(&table(), None, 10);
        assert_eq!(summary.lines().count(), 2 + 5);
    }

    #[test]
    fn test_summary_unknown_company_message() {
        let summary = summarize_context(&table(), Some("amazon"), 5);
        assert_eq!(summary, "No data found for amazon.");
    }

    #[test]
    fn test_summary_projects_only_present_columns() {
        let summary = summarize_context(&table(), Some("tesla"), 5);
        let header = summary.lines().next().unwrap();
        assert_eq!(
            header,
            "| Fiscal Year | Total Revenue | Revenue Growth (%) |"
        );
        assert!(!summary.contains("Total Assets"));
    }

    #[test]
    fn test_summary_renders_growth_and_missing_values() {
        let summary = summarize_context(&table(), Some("tesla"), 5);
        let first_row = summary.lines().nth(2).unwrap();
        // 2019 is Tesla's earliest year: growth is undefined.
        assert_eq!(first_row, "| 2019 | 100 | n/a |");
        let second_row = summary.lines().nth(3).unwrap();
        assert_eq!(second_row, "| 2020 | 200 | 100 |");
    }

    #[test]
    fn test_summary_idempotent() {
        let table = table();
        let first = summarize_context(&table, Some("tesla"), 3);
        let second = summarize_context(&table, Some("tesla"), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_fractional_values_use_two_decimals() {
        let table = FinancialTable::new(
            vec![
                record("Tesla", 2021, Some(3.0)),
                record("Tesla", 2022, Some(4.0)),
            ],
            &[Column::FiscalYear, Column::TotalRevenue],
        );
        let summary = summarize_context(&table, Some("tesla"), 5);
        // Growth from 3 to 4 is 33.33...%, rendered with two decimals.
        assert!(summary.contains("33.33"));
    }
}
