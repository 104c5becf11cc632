//! Persona-driven text generation.
//!
//! [`Agent`] is the narrow client the simulated retrieval skills talk to: it takes a persona
//! (system instructions) and a single query, performs exactly one chat round trip bounded by a
//! timeout, and returns the generated text. Anything short of a non-empty answer is reported as
//! [`ToolError::RetrievalUnavailable`].
//!
//! # Example
//!
//! ```rust,no_run
//! use skillkit::Agent;
//! use skillkit::clients::openai::OpenAIClient;
//! use std::sync::Arc;
//!
//! # async {
//! let agent = Agent::new(Arc::new(OpenAIClient::new_with_model_string("key", "gpt-4o")));
//! let text = agent
//!     .generate("You are a terse librarian.", "Recommend one book.")
//!     .await;
//! # };
//! ```

use crate::client_wrapper::{ClientWrapper, Message, TokenUsage};
use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::tool_protocol::ToolError;
use std::sync::Arc;
use std::time::Duration;

/// Single-shot generator bound to one chat client.
#[derive(Clone)]
pub struct Agent {
    client: Arc<dyn ClientWrapper>,
    timeout: Duration,
}

impl Agent {
    /// Wrap a client using the default request timeout.
    pub fn new(client: Arc<dyn ClientWrapper>) -> Self {
        Self {
            client,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override how long a single generation may take.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Name of the model behind the client.
    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Usage of the most recent generation, when the client reports it.
    pub async fn last_usage(&self) -> Option<TokenUsage> {
        self.client.get_last_usage().await
    }

    /// Ask the model to answer `query` while playing `persona`.
    ///
    /// Dropping the returned future cancels the in-flight request.
    pub async fn generate(&self, persona: &str, query: &str) -> Result<String, ToolError> {
        let messages = [Message::system(persona), Message::user(query)];

        let reply = match tokio::time::timeout(self.timeout, self.client.send_message(&messages))
            .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                log::error!(
                    "Agent::generate(...): {} request failed: {}",
                    self.client.model_name(),
                    err
                );
                return Err(ToolError::RetrievalUnavailable(err.to_string()));
            }
            Err(_) => {
                log::error!(
                    "Agent::generate(...): {} did not answer within {:?}",
                    self.client.model_name(),
                    self.timeout
                );
                return Err(ToolError::RetrievalUnavailable(format!(
                    "no response within {:?}",
                    self.timeout
                )));
            }
        };

        if reply.content.trim().is_empty() {
            return Err(ToolError::RetrievalUnavailable(
                "model returned an empty response".to_string(),
            ));
        }

        Ok(reply.content)
    }
}
