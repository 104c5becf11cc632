//! Simulated retrieval skills against mock chat clients.

use async_trait::async_trait;
use serde_json::json;
use skillkit::client_wrapper::{ClientWrapper, Message, Role, TokenUsage};
use skillkit::tool_protocol::ToolError;
use skillkit::tools::{
    skill_registry, RetrievalPlugin, BANKING_DATABASE, INSURANCE_KNOWLEDGE_BASE, PERSONAS,
    SALES_ANALYTICS_STORE,
};
use skillkit::Agent;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Returns a fixed reply and remembers every conversation it was sent.
struct RecordingClient {
    reply: String,
    calls: Mutex<Vec<Vec<Message>>>,
    usage: tokio::sync::Mutex<Option<TokenUsage>>,
}

impl RecordingClient {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
            usage: tokio::sync::Mutex::new(None),
        }
    }

    fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientWrapper for RecordingClient {
    async fn send_message(
        &self,
        messages: &[Message],
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        self.calls.lock().unwrap().push(messages.to_vec());
        *self.usage.lock().await = Some(TokenUsage {
            input_tokens: 12,
            output_tokens: 3,
            total_tokens: 15,
        });
        Ok(Message {
            role: Role::Assistant,
            content: self.reply.clone(),
        })
    }

    fn model_name(&self) -> &str {
        "recording"
    }

    fn usage_slot(&self) -> Option<&tokio::sync::Mutex<Option<TokenUsage>>> {
        Some(&self.usage)
    }
}

struct FailingClient;

#[async_trait]
impl ClientWrapper for FailingClient {
    async fn send_message(
        &self,
        _messages: &[Message],
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        Err("connection refused".into())
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

struct SlowClient;

#[async_trait]
impl ClientWrapper for SlowClient {
    async fn send_message(
        &self,
        _messages: &[Message],
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Message {
            role: Role::Assistant,
            content: "too late".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "slow"
    }
}

fn is_unavailable(err: &ToolError) -> bool {
    matches!(err, ToolError::RetrievalUnavailable(_))
}

#[tokio::test]
async fn test_generate_sends_persona_then_query() {
    let client = Arc::new(RecordingClient::new("Deductible is 500 EUR."));
    let agent = Agent::new(client.clone());

    let text = agent
        .generate("You are a test persona.", "What is the deductible?")
        .await
        .unwrap();
    assert_eq!(text, "Deductible is 500 EUR.");

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        vec![
            Message::system("You are a test persona."),
            Message::user("What is the deductible?"),
        ]
    );

    let usage = agent.last_usage().await.unwrap();
    assert_eq!(usage.total_tokens, 15);
    assert_eq!(agent.model_name(), "recording");
}

#[tokio::test]
async fn test_each_persona_uses_its_own_instructions() {
    let client = Arc::new(RecordingClient::new("{\"ok\": true}"));
    let agent = Arc::new(Agent::new(client.clone()));

    for persona in PERSONAS.iter() {
        let plugin = RetrievalPlugin::new(*persona, agent.clone());
        let content = plugin.retrieve("last quarter").await.unwrap();
        assert_eq!(content, "{\"ok\": true}");
    }

    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    let instructions: Vec<&str> = calls.iter().map(|c| c[0].content.as_str()).collect();
    assert_eq!(
        instructions,
        vec![
            INSURANCE_KNOWLEDGE_BASE.instructions,
            BANKING_DATABASE.instructions,
            SALES_ANALYTICS_STORE.instructions,
        ]
    );
    assert!(calls.iter().all(|c| c[1] == Message::user("last quarter")));
}

#[tokio::test]
async fn test_empty_response_is_unavailable() {
    for reply in ["", "   \n"] {
        let agent = Arc::new(Agent::new(Arc::new(RecordingClient::new(reply))));
        let plugin = RetrievalPlugin::new(BANKING_DATABASE, agent);

        let err = plugin.retrieve("balance of account 42").await.unwrap_err();
        assert!(is_unavailable(&err), "{:?}", err);
    }
}

#[tokio::test]
async fn test_service_error_is_unavailable() {
    let agent = Arc::new(Agent::new(Arc::new(FailingClient)));
    let plugin = RetrievalPlugin::new(SALES_ANALYTICS_STORE, agent);

    let err = plugin.retrieve("top products").await.unwrap_err();
    assert_eq!(
        err,
        ToolError::RetrievalUnavailable("connection refused".to_string())
    );
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let agent = Agent::new(Arc::new(SlowClient)).with_timeout(Duration::from_millis(50));
    assert_eq!(agent.timeout(), Duration::from_millis(50));

    let started = std::time::Instant::now();
    let err = agent.generate("persona", "query").await.unwrap_err();
    assert!(is_unavailable(&err));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_retrieval_through_registry() {
    let client = Arc::new(RecordingClient::new("Claims are settled within 14 days."));
    let registry = skill_registry(Arc::new(Agent::new(client.clone())))
        .await
        .unwrap();

    let result = registry
        .execute_tool(
            "get_insurance_context",
            json!({"query": "How long do claims take?"}),
        )
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.as_text(), Some("Claims are settled within 14 days."));
    assert_eq!(result.metadata.get("agent_id"), Some(&json!("RAGAgent")));

    let metadata = registry
        .get_tool("get_insurance_context")
        .unwrap()
        .metadata();
    assert_eq!(metadata.protocol_metadata["agent_id"], "RAGAgent");

    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn test_unavailable_through_registry() {
    let registry = skill_registry(Arc::new(Agent::new(Arc::new(RecordingClient::new("")))))
        .await
        .unwrap();

    let err = registry
        .execute_tool("get_sales_analysis", json!({"query": "revenue"}))
        .await
        .unwrap_err();
    let err = err.downcast_ref::<ToolError>().unwrap();
    assert!(is_unavailable(err));
}

#[tokio::test]
async fn test_concurrent_invocations() {
    let client = Arc::new(RecordingClient::new("data"));
    let registry = Arc::new(
        skill_registry(Arc::new(Agent::new(client.clone())))
            .await
            .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            registry
                .execute_tool("get_banking_data", json!({ "query": format!("q{}", i) }))
                .await
                .map(|r| r.output)
                .map_err(|e| e.to_string())
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), json!("data"));
    }
    assert_eq!(client.calls().len(), 8);
}
