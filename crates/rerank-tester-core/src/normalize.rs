use tracing::warn;

use crate::table::Cell;

/// Turns a `documents` cell into the ordered list sent to the reranker.
///
/// Text is split on `\n` with every piece kept as-is, empty ones included.
/// Any other value becomes a single document holding its string form. An
/// empty cell yields one empty document. The result is never empty.
pub fn normalize_documents(cell: &Cell) -> Vec<String> {
    match cell {
        Cell::Text(text) => text.split('\n').map(str::to_string).collect(),
        Cell::Empty => {
            warn!("documents cell is empty; sending a single empty document");
            vec![String::new()]
        }
        other => vec![other.to_string()],
    }
}

pub fn query_text(cell: &Cell) -> String {
    cell.to_string()
}
