use serde::{Deserialize, Serialize};

/// One scored document in the output table. Field order is the CSV column
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub query: String,
    pub document: String,
    pub relevance_score: f64,
    pub index: usize,
}
