//! The `OpenAIClient` struct implements `ClientWrapper` for OpenAI's Chat Completions API
//! (and any endpoint speaking the same protocol), capturing the assistant response and the
//! token usage of the most recent request.
//!
//! # Example
//!
//! ```rust,no_run
//! use skillkit::clients::openai::OpenAIClient;
//! use skillkit::client_wrapper::{ClientWrapper, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let secret_key = std::env::var("OPEN_AI_SECRET")?;
//!     let client = OpenAIClient::new_with_model_string(&secret_key, "gpt-4.1-nano");
//!
//!     let resp = client
//!         .send_message(&[
//!             Message::system("You are an assistant."),
//!             Message::user("Hello!"),
//!         ])
//!         .await?;
//!     println!("Assistant: {}", resp.content);
//!
//!     if let Some(usage) = client.get_last_usage().await {
//!         println!("Tokens used: {}", usage.total_tokens);
//!     }
//!     Ok(())
//! }
//! ```
use std::error::Error;

use async_trait::async_trait;
use openai_rust::chat;
use openai_rust2 as openai_rust;
use tokio::sync::Mutex;

use crate::client_wrapper::{ClientWrapper, Message, Role, TokenUsage};
use crate::clients::common::{get_shared_http_client, send_and_track};

/// Client wrapper for OpenAI-compatible Chat Completions endpoints.
pub struct OpenAIClient {
    /// Underlying SDK client pointing at the REST endpoint.
    client: openai_rust::Client,
    /// Model name that will be injected into each request.
    model: String,
    /// Storage for the token usage returned by the most recent request.
    token_usage: Mutex<Option<TokenUsage>>,
}

impl OpenAIClient {
    /// Construct a new client using the provided API key and explicit model name.
    pub fn new_with_model_string(secret_key: &str, model_name: &str) -> Self {
        OpenAIClient {
            client: openai_rust::Client::new_with_client(
                secret_key,
                get_shared_http_client().clone(),
            ),
            model: model_name.to_string(),
            token_usage: Mutex::new(None),
        }
    }

    /// Construct a client targeting a custom OpenAI compatible base URL.
    pub fn new_with_base_url(secret_key: &str, model_name: &str, base_url: &str) -> Self {
        OpenAIClient {
            client: openai_rust::Client::new_with_client_and_base_url(
                secret_key,
                get_shared_http_client().clone(),
                base_url,
            ),
            model: model_name.to_string(),
            token_usage: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ClientWrapper for OpenAIClient {
    async fn send_message(
        &self,
        messages: &[Message],
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        let formatted_messages = messages
            .iter()
            .map(|msg| chat::Message {
                role: msg.role.as_str().to_owned(),
                content: msg.content.clone(),
            })
            .collect::<Vec<_>>();

        let content = send_and_track(
            &self.client,
            &self.model,
            formatted_messages,
            Some("/v1/chat/completions".to_string()),
            &self.token_usage,
        )
        .await?;

        Ok(Message {
            role: Role::Assistant,
            content,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        Some(&self.token_usage)
    }
}
