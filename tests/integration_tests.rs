use anyhow::Result;
use financial_insight_chat::{
    load, rule_based_response, summarize_context, Column, FinancialTable,
};
use std::io::Write;
use tempfile::NamedTempFile;

const FULL_HEADER: &str = "Company,Fiscal Year,Total Revenue,Net Income,Total Assets,\
                           Total Liabilities,Cash Flow from Operating Activities";

fn write_dataset(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    writeln!(file, "{}", FULL_HEADER)?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    Ok(file)
}

fn three_company_table() -> Result<(NamedTempFile, FinancialTable)> {
    let file = write_dataset(&[
        "Microsoft,2022,200,50,900,400,80",
        "Microsoft,2023,300,60,1000,450,90",
        "Apple,2022,150,40,700,300,60",
        "Apple,2023,150,45,750,320,70",
        "Tesla,2022,400,20,500,250,30",
        "Tesla,2023,600,35,600,280,40",
    ])?;
    let table = load(file.path())?;
    Ok((file, table))
}

#[test]
fn test_loader_growth_round_trip() -> Result<()> {
    let (_file, table) = three_company_table()?;

    for company in table.companies() {
        let records = table.company_records(company);
        // Earliest year per company has undefined growth.
        assert!(records[0].revenue_growth_pct.is_none());
        assert!(records[0].net_income_growth_pct.is_none());
        // Every later year has growth consistent with the prior row.
        for pair in records.windows(2) {
            let (prev, current) = (pair[0], pair[1]);
            let expected = (current.total_revenue.unwrap() - prev.total_revenue.unwrap())
                / prev.total_revenue.unwrap()
                * 100.0;
            assert!((current.revenue_growth_pct.unwrap() - expected).abs() < 1e-9);
        }
    }
    Ok(())
}

#[test]
fn test_tesla_total_revenue_scenario() -> Result<()> {
    let file = write_dataset(&["Tesla,2022,10000,800,,,", "Tesla,2023,12000,900,,,"])?;
    let table = load(file.path())?;

    assert_eq!(
        rule_based_response("What is Tesla's total revenue?", &table).unwrap(),
        "Tesla's total revenue (all years) is $22,000."
    );
    Ok(())
}

#[test]
fn test_apple_net_income_trend_scenario() -> Result<()> {
    let file = write_dataset(&["Apple,2022,5000,1000,,,", "Apple,2023,5500,1500,,,"])?;
    let table = load(file.path())?;

    assert_eq!(
        rule_based_response("How has Apple's net income changed?", &table).unwrap(),
        "Apple's net income increased by $500 (50.0%) from 2022 to 2023."
    );
    Ok(())
}

#[test]
fn test_highest_revenue_scenario() -> Result<()> {
    let file = write_dataset(&[
        "Microsoft,2023,500,1,,,",
        "Apple,2023,300,1,,,",
        "Tesla,2023,1000,1,,,",
    ])?;
    let table = load(file.path())?;

    assert_eq!(
        rule_based_response("Which company has the highest revenue?", &table).unwrap(),
        "Tesla has the highest total revenue: $1,000."
    );
    Ok(())
}

#[test]
fn test_unmatched_query_falls_through_to_completion_path() -> Result<()> {
    let (_file, table) = three_company_table()?;
    assert!(rule_based_response("Write a haiku about balance sheets", &table).is_none());
    Ok(())
}

#[test]
fn test_summary_of_loaded_table_is_bounded_and_stable() -> Result<()> {
    let (_file, table) = three_company_table()?;

    let summary = summarize_context(&table, Some("tesla"), 1);
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("| 2023 |"));

    assert_eq!(summary, summarize_context(&table, Some("tesla"), 1));
    Ok(())
}

#[test]
fn test_summary_includes_all_loaded_columns() -> Result<()> {
    let (_file, table) = three_company_table()?;
    let summary = summarize_context(&table, None, 10);
    let header = summary.lines().next().unwrap();

    for column in Column::SUMMARY_ORDER {
        assert!(
            header.contains(column.header()),
            "missing column {:?}",
            column
        );
    }
    Ok(())
}

#[test]
fn test_sparse_cells_load_as_null_and_do_not_poison_sums() -> Result<()> {
    let file = write_dataset(&[
        "Tesla,2022,10000,unknown,,,",
        "Tesla,2023,n/a,900,,,",
    ])?;
    let table = load(file.path())?;

    let records = table.company_records("Tesla");
    assert!(records[0].net_income.is_none());
    assert!(records[1].total_revenue.is_none());

    // The 2023 revenue cell was unparseable, so the sum is the 2022 value.
    assert_eq!(
        rule_based_response("What is Tesla's total revenue?", &table).unwrap(),
        "Tesla's total revenue (all years) is $10,000."
    );
    Ok(())
}
