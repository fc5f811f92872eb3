#[derive(Debug, Clone, PartialEq)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
    pub top_n: Option<usize>,
}

impl RerankRequest {
    /// Builds a request that asks for a score on every document.
    pub fn all(query: impl Into<String>, documents: Vec<String>) -> Self {
        let top_n = Some(documents.len());
        Self {
            query: query.into(),
            documents,
            top_n,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RerankItem {
    /// Position of the document in the request's `documents`.
    pub index: usize,
    pub relevance_score: f64,
    /// Document text echoed by the service, if it sent one back.
    pub document: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RerankResponse {
    pub provider: String,
    pub model: String,
    pub items: Vec<RerankItem>,
}
