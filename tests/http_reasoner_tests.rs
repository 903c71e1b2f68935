use futures::StreamExt;
use serde_json::json;
use tripwright::{HttpReasoner, ReasoningClient};

#[tokio::test]
async fn complete_extracts_trimmed_message_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"content": "  Take ANA.  "}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let reasoner = HttpReasoner::new("test-key".to_string()).with_base_url(server.url());
    let text = reasoner.complete("pick a flight", None).await.unwrap();

    assert_eq!(text, "Take ANA.");
    mock.assert_async().await;
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": {"message": "model not found"}}).to_string())
        .create_async()
        .await;

    let reasoner = HttpReasoner::new("test-key".to_string()).with_base_url(server.url());
    let err = reasoner.complete("pick a flight", None).await.unwrap_err();

    assert!(err.to_string().contains("model not found"));
}

#[tokio::test]
async fn missing_content_is_a_reasoning_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": []}).to_string())
        .create_async()
        .await;

    let reasoner = HttpReasoner::new("test-key".to_string()).with_base_url(server.url());
    let err = reasoner.complete("pick a flight", None).await.unwrap_err();

    assert!(err.to_string().contains("missing message content"));
}

#[tokio::test]
async fn chat_returns_the_raw_assistant_message() {
    let message = json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{
            "id": "call_1",
            "type": "function",
            "function": {"name": "search_flights", "arguments": "{\"destination\": \"Tokyo\"}"}
        }]
    });

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": message}]}).to_string())
        .create_async()
        .await;

    let reasoner = HttpReasoner::new("test-key".to_string()).with_base_url(server.url());
    let tools = vec![json!({"type": "function", "function": {"name": "search_flights"}})];
    let reply = reasoner
        .chat(&[json!({"role": "user", "content": "plan it"})], &tools)
        .await
        .unwrap();

    assert_eq!(
        reply.pointer("/tool_calls/0/function/name").unwrap(),
        "search_flights"
    );
}

#[tokio::test]
async fn stream_yields_delta_fragments_until_done() {
    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Take \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"ANA.\"}}]}\n\n",
        "data: [DONE]\n\n",
    );

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let reasoner = HttpReasoner::new("test-key".to_string()).with_base_url(server.url());
    let stream = reasoner.stream("pick a flight").await.unwrap();
    let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;

    assert_eq!(fragments, vec!["Take ", "ANA."]);
}
