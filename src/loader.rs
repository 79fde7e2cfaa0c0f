use crate::error::{FinancialChatError, Result};
use crate::model::{Column, FinancialRecord, FinancialTable};
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info};
use std::path::Path;

const COMPANY_HEADER: &str = "Company";

/// Metric columns coerced to numbers when present in the source file.
const NUMERIC_COLUMNS: [Column; 5] = [
    Column::TotalRevenue,
    Column::NetIncome,
    Column::TotalAssets,
    Column::TotalLiabilities,
    Column::OperatingCashFlow,
];

/// A parsed source file before domain conversion: the header row plus data
/// rows in file order.
struct RawSheet {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

/// Loads the financial dataset from a CSV or spreadsheet file, selected by
/// extension. Returns a [`FinancialTable`] with records stably sorted by
/// (company, fiscal year) and growth metrics derived per company partition,
/// so identical input bytes always produce an identical table.
///
/// Fails when the file cannot be read or parsed, when the `Company` or
/// `Fiscal Year` column is missing, or when a fiscal-year cell is not an
/// integer. Non-numeric cells in metric columns become `None` instead of
/// failing.
pub fn load(path: impl AsRef<Path>) -> Result<FinancialTable> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let sheet = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xls" => read_spreadsheet(path)?,
        _ => {
            return Err(FinancialChatError::UnsupportedExtension(
                path.display().to_string(),
            ))
        }
    };

    build_table(sheet)
}

fn read_csv(path: &Path) -> Result<RawSheet> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                let field = field.trim();
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(RawSheet { headers, rows })
}

fn read_spreadsheet(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(calamine::Error::Msg("workbook contains no sheets"))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows_iter = range.rows();
    let headers = match rows_iter.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = rows_iter
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        other => CellValue::Text(other.to_string()),
    }
}

fn build_table(sheet: RawSheet) -> Result<FinancialTable> {
    let company_idx = find_column(&sheet.headers, COMPANY_HEADER)?;
    let year_idx = find_column(&sheet.headers, Column::FiscalYear.header())?;

    let mut source_columns = vec![Column::FiscalYear];
    let mut metric_indices = Vec::new();
    for column in NUMERIC_COLUMNS {
        if let Some(idx) = sheet.headers.iter().position(|h| h == column.header()) {
            source_columns.push(column);
            metric_indices.push((column, idx));
        }
    }
    debug!(
        "source columns: {:?}",
        source_columns.iter().map(|c| c.header()).collect::<Vec<_>>()
    );

    let mut records = Vec::with_capacity(sheet.rows.len());
    for (row_number, row) in sheet.rows.iter().enumerate() {
        let company = match row.get(company_idx) {
            Some(CellValue::Text(s)) => s.clone(),
            Some(CellValue::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let fiscal_year = parse_fiscal_year(row.get(year_idx), row_number + 1)?;

        let mut record = FinancialRecord {
            company,
            fiscal_year,
            ..Default::default()
        };
        for (column, idx) in &metric_indices {
            let value = row.get(*idx).and_then(coerce_numeric);
            set_metric(&mut record, *column, value);
        }
        records.push(record);
    }

    let table = FinancialTable::new(records, &source_columns);
    info!(
        "loaded {} financial records covering {} companies",
        table.records().len(),
        table.companies().len()
    );
    Ok(table)
}

fn find_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| FinancialChatError::MissingColumn(name.to_string()))
}

fn parse_fiscal_year(cell: Option<&CellValue>, row: usize) -> Result<i32> {
    let invalid = |value: &str| FinancialChatError::InvalidFiscalYear {
        row,
        value: value.to_string(),
    };

    match cell {
        Some(CellValue::Number(v)) if v.fract() == 0.0 => Ok(*v as i32),
        Some(CellValue::Number(v)) => Err(invalid(&v.to_string())),
        Some(CellValue::Text(s)) => {
            // Spreadsheet exports sometimes render years as "2023.0".
            if let Ok(year) = s.parse::<i32>() {
                return Ok(year);
            }
            match s.parse::<f64>() {
                Ok(v) if v.fract() == 0.0 => Ok(v as i32),
                _ => Err(invalid(s)),
            }
        }
        _ => Err(invalid("")),
    }
}

/// Numeric coercion: numbers pass through, text is parsed after stripping
/// currency symbols and thousands separators, anything else becomes `None`.
fn coerce_numeric(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(v) => Some(*v),
        CellValue::Text(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim().trim_start_matches('$').trim();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse().ok()
            }
        }
        CellValue::Empty => None,
    }
}

fn set_metric(record: &mut FinancialRecord, column: Column, value: Option<f64>) {
    match column {
        Column::TotalRevenue => record.total_revenue = value,
        Column::NetIncome => record.net_income = value,
        Column::TotalAssets => record.total_assets = value,
        Column::TotalLiabilities => record.total_liabilities = value,
        Column::OperatingCashFlow => record.operating_cash_flow = value,
        Column::FiscalYear | Column::RevenueGrowthPct | Column::NetIncomeGrowthPct => {}
    }
}
