/*!
 * Tests for provider request builders and failure mapping
 */

use dishfinder::errors::ProviderError;
use dishfinder::providers::Provider;
use dishfinder::providers::anthropic::{Anthropic, AnthropicRequest};
use dishfinder::providers::ollama::{ChatMessage, ChatRequest, Ollama};
use dishfinder::providers::openai::{OpenAI, OpenAIRequest};

const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn test_openaiRequest_chained_shouldSerializeAllFields() {
    let request = OpenAIRequest::new("gpt-4")
        .add_message("user", "recommend three dish types")
        .temperature(0.7)
        .max_tokens(100);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "gpt-4");
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["max_tokens"], 100);
}

#[test]
fn test_openaiRequest_withoutOptions_shouldOmitThem() {
    let json = serde_json::to_value(OpenAIRequest::new("gpt-4")).unwrap();
    assert!(json.get("temperature").is_none());
    assert!(json.get("max_tokens").is_none());
}

#[test]
fn test_anthropicRequest_system_shouldSerializeTopLevel() {
    let request = AnthropicRequest::new("claude-3-haiku-20240307", 100)
        .system("You are a nutritionist")
        .add_message("user", "Hello");
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["system"], "You are a nutritionist");
    assert_eq!(json["max_tokens"], 100);
    assert_eq!(json["messages"].as_array().map(|m| m.len()), Some(1));
}

#[test]
fn test_ollamaChatRequest_shouldDisableStreaming() {
    let request = ChatRequest::new("llama3.2:3b", vec![ChatMessage {
        role: "user".to_string(),
        content: "Hello".to_string(),
    }]);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["stream"], false);
    assert!(json.get("options").is_none());
}

#[tokio::test]
async fn test_openai_complete_withUnreachableEndpoint_shouldBeConnectionError() {
    let client = OpenAI::new("sk-test", UNREACHABLE, 2);
    let result = client.complete(OpenAIRequest::new("gpt-4").add_message("user", "hi")).await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_anthropic_testConnection_withUnreachableEndpoint_shouldFail() {
    let client = Anthropic::new("key", UNREACHABLE, 2);
    assert!(client.test_connection().await.is_err());
}

#[tokio::test]
async fn test_anthropic_testModel_withUnreachableEndpoint_shouldBeConnectionError() {
    let client = Anthropic::new("key", UNREACHABLE, 2);
    let result = client.test_model("claude-3-5-sonnet-20241022").await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_ollama_complete_withUnreachableServer_shouldFailAfterRetries() {
    let client = Ollama::new(UNREACHABLE, 2, 1, 1);
    let request = ChatRequest::new("llama3.2:3b", Vec::new());
    let result = client.complete(request).await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}
