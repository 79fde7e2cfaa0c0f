use serde::{Deserialize, Serialize};

/// Identifiers for the tabular columns the service understands. `Company` is
/// the partition key rather than a projected column, so it is not listed
/// here; everything else appears in summary output in [`Column::SUMMARY_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    FiscalYear,
    TotalRevenue,
    NetIncome,
    RevenueGrowthPct,
    NetIncomeGrowthPct,
    TotalAssets,
    TotalLiabilities,
    OperatingCashFlow,
}

impl Column {
    /// Projection order used by the context summarizer.
    pub const SUMMARY_ORDER: [Column; 8] = [
        Column::FiscalYear,
        Column::TotalRevenue,
        Column::NetIncome,
        Column::RevenueGrowthPct,
        Column::NetIncomeGrowthPct,
        Column::TotalAssets,
        Column::TotalLiabilities,
        Column::OperatingCashFlow,
    ];

    /// Header text as it appears in the source file and in summary tables.
    pub fn header(self) -> &'static str {
        match self {
            Column::FiscalYear => "Fiscal Year",
            Column::TotalRevenue => "Total Revenue",
            Column::NetIncome => "Net Income",
            Column::RevenueGrowthPct => "Revenue Growth (%)",
            Column::NetIncomeGrowthPct => "Net Income Growth (%)",
            Column::TotalAssets => "Total Assets",
            Column::TotalLiabilities => "Total Liabilities",
            Column::OperatingCashFlow => "Cash Flow from Operating Activities",
        }
    }
}

/// One row of the dataset: a single company's figures for one fiscal year.
///
/// Metric fields are `None` when the source cell was empty or could not be
/// coerced to a number. The growth fields are derived, never loaded: they
/// compare against the same company's immediately preceding fiscal year and
/// are `None` for a company's earliest year or when the prior value is
/// missing or exactly zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub company: String,
    pub fiscal_year: i32,
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub revenue_growth_pct: Option<f64>,
    pub net_income_growth_pct: Option<f64>,
}

impl FinancialRecord {
    /// Numeric value of a projected column for this record.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::FiscalYear => Some(f64::from(self.fiscal_year)),
            Column::TotalRevenue => self.total_revenue,
            Column::NetIncome => self.net_income,
            Column::RevenueGrowthPct => self.revenue_growth_pct,
            Column::NetIncomeGrowthPct => self.net_income_growth_pct,
            Column::TotalAssets => self.total_assets,
            Column::TotalLiabilities => self.total_liabilities,
            Column::OperatingCashFlow => self.operating_cash_flow,
        }
    }
}

/// The loaded dataset. Records are stably sorted by (company, fiscal year)
/// ascending, growth metrics are populated per company partition, and the
/// column set reflects what the source file actually contained. Immutable
/// after construction; share it via `Arc` into the matcher and summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTable {
    records: Vec<FinancialRecord>,
    columns: Vec<Column>,
}

impl FinancialTable {
    /// Builds a table from raw records and the set of columns present in the
    /// source. Sorting, growth derivation and derived-column presence are
    /// handled here so every constructed table upholds the same invariants.
    pub fn new(mut records: Vec<FinancialRecord>, source_columns: &[Column]) -> Self {
        records.sort_by(|a, b| {
            a.company
                .cmp(&b.company)
                .then(a.fiscal_year.cmp(&b.fiscal_year))
        });

        let columns = Column::SUMMARY_ORDER
            .iter()
            .copied()
            .filter(|column| match column {
                Column::RevenueGrowthPct => source_columns.contains(&Column::TotalRevenue),
                Column::NetIncomeGrowthPct => source_columns.contains(&Column::NetIncome),
                other => source_columns.contains(other),
            })
            .collect();

        let mut table = Self { records, columns };
        table.compute_growth();
        table
    }

    fn compute_growth(&mut self) {
        for i in 0..self.records.len() {
            let (prev_revenue, prev_income) =
                if i > 0 && self.records[i - 1].company == self.records[i].company {
                    (
                        self.records[i - 1].total_revenue,
                        self.records[i - 1].net_income,
                    )
                } else {
                    (None, None)
                };

            let record = &mut self.records[i];
            record.revenue_growth_pct = growth_percent(prev_revenue, record.total_revenue);
            record.net_income_growth_pct = growth_percent(prev_income, record.net_income);
        }
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    /// Columns present in this table, in summary projection order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one company, matched by case-insensitive exact name.
    /// Already ascending by fiscal year thanks to the construction sort.
    pub fn company_records(&self, company: &str) -> Vec<&FinancialRecord> {
        self.records
            .iter()
            .filter(|r| r.company.eq_ignore_ascii_case(company))
            .collect()
    }

    /// Company names in grouping order (lexicographic, first spelling wins
    /// for case-insensitive duplicates).
    pub fn companies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.iter().any(|c| c.eq_ignore_ascii_case(&record.company)) {
                seen.push(record.company.as_str());
            }
        }
        seen
    }
}

fn growth_percent(prev: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (prev, current) {
        (Some(p), Some(c)) if p != 0.0 => Some((c - p) / p * 100.0),
        _ => None,
    }
}
