//! Closure-backed tools.
//!
//! [`CustomToolProtocol`] serves tools whose behaviour is a plain Rust closure, either
//! blocking ([`ToolFunction`]) or returning a boxed future ([`AsyncToolFunction`]). Every skill
//! in [`crate::tools`] is registered this way.

use crate::tool_protocol::{ToolError, ToolMetadata, ToolProtocol, ToolResult};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;

type HandlerResult = Result<ToolResult, Box<dyn Error + Send + Sync>>;

/// Handler that computes its result on the calling task.
pub type ToolFunction = Arc<dyn Fn(JsonValue) -> HandlerResult + Send + Sync>;

/// Handler that awaits something (typically a model call) before answering.
pub type AsyncToolFunction =
    Arc<dyn Fn(JsonValue) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

#[derive(Clone)]
enum Handler {
    Blocking(ToolFunction),
    Awaiting(AsyncToolFunction),
}

impl Handler {
    async fn call(self, parameters: JsonValue) -> HandlerResult {
        match self {
            Handler::Blocking(f) => f(parameters),
            Handler::Awaiting(f) => f(parameters).await,
        }
    }
}

struct Entry {
    metadata: ToolMetadata,
    handler: Handler,
}

/// Registry-facing adapter over named closures.
///
/// # Example
///
/// ```rust
/// use skillkit::tool_protocols::CustomToolProtocol;
/// use skillkit::tool_protocol::{ToolMetadata, ToolParameter, ToolParameterType, ToolResult};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let skills = CustomToolProtocol::new();
///
/// skills
///     .register_tool(
///         ToolMetadata::new("shout", "Upper-cases a word")
///             .with_parameter(ToolParameter::new("word", ToolParameterType::String).required()),
///         Arc::new(|params| {
///             let word = params["word"].as_str().unwrap_or_default();
///             Ok(ToolResult::success(serde_json::json!(word.to_uppercase())))
///         }),
///     )
///     .await;
/// # }
/// ```
pub struct CustomToolProtocol {
    entries: RwLock<HashMap<String, Entry>>,
}

impl CustomToolProtocol {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn insert(&self, metadata: ToolMetadata, handler: Handler) {
        let name = metadata.name.clone();
        log::debug!("registering skill handler '{}'", name);
        self.entries
            .write()
            .await
            .insert(name, Entry { metadata, handler });
    }

    /// Register a blocking handler, replacing any tool already using that name.
    pub async fn register_tool(&self, metadata: ToolMetadata, function: ToolFunction) {
        self.insert(metadata, Handler::Blocking(function)).await;
    }

    /// Register a future-returning handler, replacing any tool already using that name.
    pub async fn register_async_tool(&self, metadata: ToolMetadata, function: AsyncToolFunction) {
        self.insert(metadata, Handler::Awaiting(function)).await;
    }

    pub async fn unregister_tool(&self, name: &str) {
        self.entries.write().await.remove(name);
    }
}

impl Default for CustomToolProtocol {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolProtocol for CustomToolProtocol {
    async fn execute(&self, tool_name: &str, parameters: JsonValue) -> HandlerResult {
        // The read guard is released before the handler runs.
        let handler = self
            .entries
            .read()
            .await
            .get(tool_name)
            .map(|entry| entry.handler.clone());

        match handler {
            Some(handler) => handler.call(parameters).await,
            None => Err(Box::new(ToolError::NotFound(tool_name.to_string()))),
        }
    }

    async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>> {
        let entries = self.entries.read().await;
        Ok(entries.values().map(|entry| entry.metadata.clone()).collect())
    }

    async fn get_tool_metadata(
        &self,
        tool_name: &str,
    ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>> {
        match self.entries.read().await.get(tool_name) {
            Some(entry) => Ok(entry.metadata.clone()),
            None => Err(Box::new(ToolError::NotFound(tool_name.to_string()))),
        }
    }

    fn protocol_name(&self) -> &str {
        "custom"
    }
}
