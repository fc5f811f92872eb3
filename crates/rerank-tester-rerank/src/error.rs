use thiserror::Error;

/// Why a single rerank call did not produce scores.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid rerank request: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode rerank response: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("provider returned invalid response: {0}")]
    InvalidResponse(String),

    #[error("provider API error: status={status}, body={body}")]
    Api { status: u16, body: String },
}
