use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::CohereRerankConfig;
use crate::error::ProviderError;
use crate::traits::RerankProvider;
use crate::types::{RerankItem, RerankRequest, RerankResponse};

#[derive(Clone)]
pub struct CohereRerankProvider {
    config: CohereRerankConfig,
    client: Client,
}

impl CohereRerankProvider {
    pub fn new(config: CohereRerankConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::Config("cohere api key is empty".to_string()));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl RerankProvider for CohereRerankProvider {
    fn name(&self) -> &'static str {
        "cohere"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn rerank(&self, request: RerankRequest) -> Result<RerankResponse, ProviderError> {
        if request.documents.is_empty() {
            return Err(ProviderError::Config(
                "rerank documents is empty".to_string(),
            ));
        }

        let top_n = request.top_n.unwrap_or(request.documents.len());
        debug!(
            model = %self.config.model,
            documents = request.documents.len(),
            top_n,
            "sending cohere rerank request"
        );
        let payload = serde_json::json!({
            "model": self.config.model,
            "query": request.query,
            "documents": request.documents,
            "top_n": top_n,
            "return_documents": true,
        });

        let res = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let bytes = res.bytes().await?;
        let parsed: CohereRerankResponse = serde_json::from_slice(&bytes)?;
        if parsed.results.is_empty() {
            warn!("cohere rerank returned empty results");
        }

        let items = parsed
            .results
            .into_iter()
            .map(|it| RerankItem {
                index: it.index,
                relevance_score: it.relevance_score,
                document: it.document.map(CohereDocument::into_text),
            })
            .collect();

        Ok(RerankResponse {
            provider: self.name().to_string(),
            model: self.config.model.clone(),
            items,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CohereRerankResponse {
    results: Vec<CohereRerankItem>,
}

#[derive(Debug, Deserialize)]
struct CohereRerankItem {
    index: usize,
    #[serde(alias = "score")]
    relevance_score: f64,
    #[serde(default)]
    document: Option<CohereDocument>,
}

/// v1 echoes `{"text": ...}`; some compatible gateways send the bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CohereDocument {
    Object { text: String },
    Plain(String),
}

impl CohereDocument {
    fn into_text(self) -> String {
        match self {
            Self::Object { text } | Self::Plain(text) => text,
        }
    }
}
