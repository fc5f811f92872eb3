use std::fmt;

use crate::error::BatchError;

pub const QUERY_COLUMN: &str = "query";
pub const DOCUMENTS_COLUMN: &str = "documents";

/// One spreadsheet cell, already decoded from the source format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write_float(f, *v),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
        }
    }
}

// Integral floats keep their ".0" so 5.0 never reads like the integer 5.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("nan")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "inf" } else { "-inf" })
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v}")
    }
}

/// The two cells of a row the pipeline cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub query: Cell,
    pub documents: Cell,
}

impl InputRow {
    pub fn new(query: impl Into<Cell>, documents: impl Into<Cell>) -> Self {
        Self {
            query: query.into(),
            documents: documents.into(),
        }
    }
}

/// A header row plus data rows, as read from the uploaded sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl InputTable {
    /// Builds a table, padding short rows with `Cell::Empty` and dropping
    /// rows that are entirely empty.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Cell::Empty);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Convenience constructor for a table that has exactly the two
    /// required columns.
    pub fn from_rows(rows: impl IntoIterator<Item = InputRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| vec![row.query, row.documents])
            .collect();
        Self::new(
            vec![QUERY_COLUMN.to_string(), DOCUMENTS_COLUMN.to_string()],
            rows,
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Checks both required columns and projects every row onto them.
    pub fn input_rows(&self) -> Result<Vec<InputRow>, BatchError> {
        let query_idx = self.require_column(QUERY_COLUMN)?;
        let documents_idx = self.require_column(DOCUMENTS_COLUMN)?;

        Ok(self
            .rows
            .iter()
            .map(|row| InputRow {
                query: row.get(query_idx).cloned().unwrap_or(Cell::Empty),
                documents: row.get(documents_idx).cloned().unwrap_or(Cell::Empty),
            })
            .collect())
    }

    fn require_column(&self, name: &str) -> Result<usize, BatchError> {
        self.column_index(name)
            .ok_or_else(|| BatchError::Schema(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_like_spreadsheet_values() {
        assert_eq!(Cell::Int(5).to_string(), "5");
        assert_eq!(Cell::Float(5.0).to_string(), "5.0");
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Float(f64::NAN).to_string(), "nan");
        assert_eq!(Cell::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Cell::Bool(true).to_string(), "True");
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::from("a\nb").to_string(), "a\nb");
    }

    #[test]
    fn new_pads_short_rows_and_drops_blank_ones() {
        let table = InputTable::new(
            vec!["query".to_string(), "documents".to_string(), "note".to_string()],
            vec![
                vec![Cell::from("q1")],
                vec![Cell::Empty, Cell::Empty, Cell::Empty],
                vec![Cell::from("q2"), Cell::from("d"), Cell::from("n")],
            ],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].len(), 3);
        assert_eq!(table.rows()[0][1], Cell::Empty);
    }

    #[test]
    fn input_rows_projects_required_columns_in_any_position() {
        let table = InputTable::new(
            vec!["documents".to_string(), "extra".to_string(), "query".to_string()],
            vec![vec![Cell::from("a\nb"), Cell::Int(1), Cell::from("q")]],
        );
        let rows = table.input_rows().expect("columns present");
        assert_eq!(rows, vec![InputRow::new("q", "a\nb")]);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let table = InputTable::new(vec!["query".to_string()], vec![vec![Cell::from("q")]]);
        match table.input_rows() {
            Err(BatchError::Schema(column)) => assert_eq!(column, DOCUMENTS_COLUMN),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn column_names_match_exactly() {
        let table = InputTable::new(
            vec!["Query".to_string(), "documents".to_string()],
            Vec::new(),
        );
        assert!(matches!(table.input_rows(), Err(BatchError::Schema(_))));
    }
}
