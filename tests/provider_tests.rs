//! Provider client tests against a mocked OpenAI-compatible API.
//!
//! These verify request shaping (model, temperature, message mapping) and
//! response/error handling without touching a real endpoint.

#![cfg(feature = "openai")]

use lectern::llm::openai::OpenAiChatClient;
use lectern::rag::embeddings::OpenAiEmbedder;
use lectern::{ChatClient, Embedder, Message, RagError, SamplingConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content,
                "refusal": null
            },
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 20,
            "completion_tokens": 8,
            "total_tokens": 28
        }
    })
}

#[tokio::test]
async fn chat_client_sends_model_and_temperature_and_reads_the_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.5
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion_body(
                "What does Andrew Ng teach?",
            )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiChatClient::new(
        "test-key".to_string(),
        server.uri(),
        "gpt-4o-mini".to_string(),
    );

    let messages = vec![
        Message::system("Rephrase the follow up question."),
        Message::human("What does he teach?"),
    ];
    let response = client
        .complete(&messages, &SamplingConfig { temperature: 0.5 })
        .await
        .unwrap();

    assert_eq!(response, "What does Andrew Ng teach?");
}

#[tokio::test]
async fn chat_client_maps_provider_failures_to_model_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenAiChatClient::new(
        "test-key".to_string(),
        server.uri(),
        "gpt-4o-mini".to_string(),
    );

    let result = client
        .complete(&[Message::human("hello")], &SamplingConfig::default())
        .await;

    assert!(matches!(result, Err(RagError::Model(_))));
}

#[tokio::test]
async fn embedder_reassembles_batch_results_by_index() {
    let server = MockServer::start().await;

    // Deliberately out of order: the client must sort by index, not arrival
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                { "object": "embedding", "index": 1, "embedding": [0.0, 1.0] },
                { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] }
            ],
            "model": "text-embedding-3-small",
            "usage": { "prompt_tokens": 4, "total_tokens": 4 }
        })))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new(
        "test-key".to_string(),
        server.uri(),
        "text-embedding-3-small".to_string(),
    );

    let vectors = embedder
        .embed_batch(&["first".to_string(), "second".to_string()])
        .await
        .unwrap();

    assert_eq!(vectors[0], vec![1.0, 0.0]);
    assert_eq!(vectors[1], vec![0.0, 1.0]);
}

#[tokio::test]
async fn embedder_maps_provider_failures_to_embedding_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new(
        "test-key".to_string(),
        server.uri(),
        "text-embedding-3-small".to_string(),
    );

    let result = embedder.embed("hello").await;
    assert!(matches!(result, Err(RagError::Embedding(_))));
}

#[tokio::test]
async fn embedder_rejects_mismatched_result_counts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] }
            ],
            "model": "text-embedding-3-small",
            "usage": { "prompt_tokens": 4, "total_tokens": 4 }
        })))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new(
        "test-key".to_string(),
        server.uri(),
        "text-embedding-3-small".to_string(),
    );

    let result = embedder
        .embed_batch(&["first".to_string(), "second".to_string()])
        .await;

    assert!(matches!(result, Err(RagError::Embedding(_))));
}
