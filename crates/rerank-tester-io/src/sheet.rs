use std::io::Read;
use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use rerank_tester_core::{Cell, InputTable};
use tracing::debug;

use crate::TableError;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads the first worksheet (or a CSV file) into an input table.
///
/// The first row is the header. Format is picked from the file extension.
pub fn load_table(path: impl AsRef<Path>) -> Result<InputTable, TableError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = if ext == "csv" {
        load_csv(std::fs::File::open(path)?)?
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        load_workbook(path)?
    } else {
        return Err(TableError::UnsupportedFormat(if ext.is_empty() {
            path.display().to_string()
        } else {
            ext
        }));
    };

    debug!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.len(),
        "loaded input table"
    );
    Ok(table)
}

fn load_workbook(path: &Path) -> Result<InputTable, TableError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::NoWorksheet(path.to_path_buf()))??;
    table_from_rows(range.rows())
}

/// Builds a table from raw worksheet rows, header first.
pub fn table_from_rows<'a>(
    mut rows: impl Iterator<Item = &'a [Data]>,
) -> Result<InputTable, TableError> {
    let header = rows.next().ok_or(TableError::MissingHeader)?;
    let columns = header.iter().map(|d| cell_from_data(d).to_string()).collect();
    let body = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(InputTable::new(columns, body))
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decodes one worksheet value. Whole-number floats read as integers, the
/// way a numeric column of whole numbers is usually meant. Dates become
/// `YYYY-MM-DD HH:MM:SS` text and error cells (`#N/A`, `#DIV/0!`) are missing.
#[allow(clippy::cast_possible_truncation)]
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Cell::Int(*v as i64),
        Data::Float(v) => Cell::Float(*v),
        Data::Bool(v) => Cell::Bool(*v),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_datetime() {
            Some(at) => Cell::Text(at.format(DATETIME_FORMAT).to_string()),
            None => Cell::Text(data.to_string()),
        },
        other => Cell::Text(other.to_string()),
    }
}

/// Reads CSV input. Every field is text; empty fields are empty cells.
pub fn load_csv(reader: impl Read) -> Result<InputTable, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() {
        return Err(TableError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(InputTable::new(columns, rows))
}
