pub mod export;
pub mod sheet;

use std::path::PathBuf;

use thiserror::Error;

pub use export::*;
pub use sheet::*;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("workbook has no worksheet: {}", .0.display())]
    NoWorksheet(PathBuf),
    #[error("unsupported input format: {0} (expected xlsx, xlsm, xlsb, xls, ods or csv)")]
    UnsupportedFormat(String),
    #[error("input has no header row")]
    MissingHeader,
}
