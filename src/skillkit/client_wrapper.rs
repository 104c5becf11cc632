//! Provider-neutral chat types and the [`ClientWrapper`] trait.
//!
//! A `ClientWrapper` is a thin wrapper around a specific chat-completion service. It does not
//! keep any conversation state: every call receives the full message list, which is exactly
//! what the single-turn persona calls made by [`Agent`](crate::Agent) need.

use async_trait::async_trait;
use std::error::Error;
use tokio::sync::Mutex;

/// Represents the possible roles for a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Set by the developer to steer the model's responses.
    System,
    /// A message sent by a human user (or the calling agent framework).
    User,
    /// Content generated by the model.
    Assistant,
}

impl Role {
    /// Wire name used by OpenAI-compatible chat endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// How many tokens were spent on prompt vs. completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// Represents a generic message sent to or received from an LLM.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// The role associated with the message.
    pub role: Role,
    /// The actual content of the message.
    pub content: String,
}

impl Message {
    /// Build a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a system (instruction) message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Shorthand for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Trait defining the interface to interact with chat-completion services.
#[async_trait]
pub trait ClientWrapper: Send + Sync {
    /// Send the conversation to the model and return the first generated message.
    async fn send_message(
        &self,
        messages: &[Message],
    ) -> Result<Message, Box<dyn Error + Send + Sync>>;

    /// Model identifier injected into each request.
    fn model_name(&self) -> &str;

    /// Usage reported by the *last* `send_message()` call, if the wrapper tracks it.
    async fn get_last_usage(&self) -> Option<TokenUsage> {
        match self.usage_slot() {
            Some(slot) => slot.lock().await.clone(),
            None => None,
        }
    }

    /// Wrappers that track [`TokenUsage`] override this to expose their storage slot.
    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        None
    }
}
