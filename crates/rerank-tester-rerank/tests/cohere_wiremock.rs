use std::time::Duration;

use rerank_tester_rerank::{
    CohereRerankConfig, CohereRerankProvider, ProviderError, RerankProvider, RerankRequest,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> CohereRerankProvider {
    let mut cfg = CohereRerankConfig::new("sk-test");
    cfg.endpoint = format!("{}/v1/rerank", server.uri());
    cfg.timeout = Duration::from_secs(5);
    CohereRerankProvider::new(cfg).unwrap()
}

#[tokio::test]
async fn cohere_sends_full_top_n_and_parses_documents() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "rerank-english-v2.0",
            "query": "cat",
            "documents": ["dog", "cat", "fish"],
            "top_n": 3,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "results": [
                { "index": 1, "relevance_score": 0.9, "document": { "text": "cat" } },
                { "index": 0, "relevance_score": 0.2, "document": { "text": "dog" } },
                { "index": 2, "relevance_score": 0.1, "document": { "text": "fish" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = RerankRequest::all(
        "cat",
        vec!["dog".to_string(), "cat".to_string(), "fish".to_string()],
    );
    let resp = provider.rerank(request).await.unwrap();

    assert_eq!(resp.provider, "cohere");
    assert_eq!(resp.model, "rerank-english-v2.0");
    assert_eq!(resp.items.len(), 3);
    assert_eq!(resp.items[0].index, 1);
    assert_eq!(resp.items[0].document.as_deref(), Some("cat"));
    assert!((resp.items[2].relevance_score - 0.1).abs() < 1e-9);
}

#[tokio::test]
async fn cohere_maps_non_success_status_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api token"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .rerank(RerankRequest::all("q", vec!["a".to_string()]))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid api token"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn cohere_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .rerank(RerankRequest::all("q", vec!["a".to_string()]))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Serde(_)));
}

#[tokio::test]
async fn empty_document_list_never_reaches_the_network() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    let err = provider
        .rerank(RerankRequest::all("q", Vec::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Config(_)));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
