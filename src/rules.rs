use crate::model::FinancialTable;
use crate::utils::format_currency;
use std::fmt;

/// Companies the rule matcher recognizes, lowercase. Expanding coverage is
/// a data change: add the name here.
pub const COMPANIES: &[&str] = &["microsoft", "apple", "tesla"];

/// Question intents the matcher can answer deterministically, evaluated in
/// [`Intent::PRIORITY`] order. The first intent whose pattern matches wins;
/// at most one rule fires per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "total revenue" + a recognized company: sum across all years.
    TotalRevenue,
    /// "net income" + "change"/"trend" + a recognized company: compare the
    /// last two fiscal years.
    NetIncomeTrend,
    /// "highest revenue" or "top revenue": argmax of per-company sums.
    TopRevenue,
}

impl Intent {
    pub const PRIORITY: [Intent; 3] = [
        Intent::TotalRevenue,
        Intent::NetIncomeTrend,
        Intent::TopRevenue,
    ];

    fn matches(self, text: &str, company: Option<&str>) -> bool {
        match self {
            Intent::TotalRevenue => text.contains("total revenue") && company.is_some(),
            Intent::NetIncomeTrend => {
                text.contains("net income")
                    && (text.contains("change") || text.contains("trend"))
                    && company.is_some()
            }
            Intent::TopRevenue => {
                text.contains("highest revenue") || text.contains("top revenue")
            }
        }
    }
}

/// Year-over-year change with an explicit sentinel for the undefined case
/// (prior value exactly zero), instead of a floating-point infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    Percent(f64),
    Unbounded,
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Percent(p) => write!(f, "{:.1}%", p),
            PercentChange::Unbounded => write!(f, "prior year was zero"),
        }
    }
}

/// First recognized company mentioned in the query, if any. Matching is a
/// case-insensitive substring check, as in the chat UI's free-text input.
pub fn detect_company(query: &str) -> Option<&'static str> {
    let lowered = query.to_lowercase();
    COMPANIES.iter().copied().find(|c| lowered.contains(c))
}

/// Attempts a deterministic answer computed directly from the table.
/// Returns `None` when no intent matches, in which case the caller falls
/// back to the completion path. Never fails: recognized-but-incomplete data
/// produces an explanatory answer, not an error.
pub fn rule_based_response(query: &str, table: &FinancialTable) -> Option<String> {
    let text = query.to_lowercase();
    let company = COMPANIES.iter().copied().find(|c| text.contains(c));

    for intent in Intent::PRIORITY {
        if !intent.matches(&text, company) {
            continue;
        }
        return match intent {
            Intent::TotalRevenue => Some(total_revenue_answer(table, company?)),
            Intent::NetIncomeTrend => Some(net_income_trend_answer(table, company?)),
            Intent::TopRevenue => top_revenue_answer(table),
        };
    }

    None
}

fn total_revenue_answer(table: &FinancialTable, company: &str) -> String {
    let total: f64 = table
        .company_records(company)
        .iter()
        .filter_map(|r| r.total_revenue)
        .sum();
    format!(
        "{}'s total revenue (all years) is {}.",
        capitalize(company),
        format_currency(total)
    )
}

fn net_income_trend_answer(table: &FinancialTable, company: &str) -> String {
    let records = table.company_records(company);
    if records.len() < 2 {
        return format!(
            "Not enough data for {} to compute net income trend.",
            capitalize(company)
        );
    }

    let prev = records[records.len() - 2];
    let last = records[records.len() - 1];
    // Missing net income counts as zero, matching how sums treat it.
    let prev_income = prev.net_income.unwrap_or(0.0);
    let last_income = last.net_income.unwrap_or(0.0);

    let change = last_income - prev_income;
    let percent = if prev_income == 0.0 {
        PercentChange::Unbounded
    } else {
        PercentChange::Percent(change.abs() / prev_income.abs() * 100.0)
    };
    let direction = if change > 0.0 { "increased" } else { "decreased" };

    format!(
        "{}'s net income {} by {} ({}) from {} to {}.",
        capitalize(company),
        direction,
        format_currency(change.abs()),
        percent,
        prev.fiscal_year,
        last.fiscal_year
    )
}

fn top_revenue_answer(table: &FinancialTable) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for company in table.companies() {
        let total: f64 = table
            .company_records(company)
            .iter()
            .filter_map(|r| r.total_revenue)
            .sum();
        match best {
            // Strict comparison keeps the first company in grouping order
            // on ties.
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((company, total)),
        }
    }

    best.map(|(company, total)| {
        format!(
            "{} has the highest total revenue: {}.",
            company,
            format_currency(total)
        )
    })
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
