use crate::llm::CompletionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinancialChatError {
    #[error("Unsupported data file extension for '{0}': expected .csv, .xlsx or .xls")]
    UnsupportedExtension(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid fiscal year '{value}' in data row {row}")]
    InvalidFiscalYear { row: usize, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),
}

pub type Result<T> = std::result::Result<T, FinancialChatError>;
