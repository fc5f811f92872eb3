use std::fmt;
use std::time::Duration;

pub const DEFAULT_COHERE_MODEL: &str = "rerank-english-v2.0";
pub const DEFAULT_COHERE_ENDPOINT: &str = "https://api.cohere.com/v1/rerank";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct CohereRerankConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl CohereRerankConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_COHERE_MODEL.to_string(),
            endpoint: DEFAULT_COHERE_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// The key must never reach logs, so Debug is written by hand.
impl fmt::Debug for CohereRerankConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CohereRerankConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
