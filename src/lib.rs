//! # SkillKit
//!
//! SkillKit packages a handful of mock skills as self-describing tools that an LLM agent
//! framework can discover and invoke by name:
//!
//! * **Local skills**: weather lookup, random numbers, the current date/time and text
//!   statistics, computed in-process.
//! * **Simulated retrieval**: an insurance knowledge base, a banking transaction database and a
//!   sales-analytics document store, each played by a chat model under a fixed persona.
//!
//! ## Core Concepts
//!
//! ### Tool Registry
//!
//! Every skill is described by [`tool_protocol::ToolMetadata`] (name, description, typed
//! parameters, return description) and executed through a [`tool_protocol::ToolProtocol`].
//! [`tool_protocol::ToolRegistry`] maps names to tools, executes them with JSON arguments, and
//! exports OpenAI function-calling schemas for the orchestrating model.
//!
//! ### Agent
//!
//! [`Agent`] is the narrow text-generation client used by the retrieval skills:
//! `generate(persona, query)` makes one chat round trip through any [`ClientWrapper`], bounded
//! by a timeout. Empty answers, provider errors and timeouts all surface as
//! [`tool_protocol::ToolError::RetrievalUnavailable`].
//!
//! ## Getting Started
//!
//! ```rust,no_run
//! use skillkit::tools::skill_registry;
//! use skillkit::{Agent, SkillKitConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     skillkit::init_logger();
//!
//!     let config = SkillKitConfig::from_env()?;
//!     let agent = Agent::new(Arc::new(config.build_client()))
//!         .with_timeout(config.request_timeout);
//!     let registry = skill_registry(Arc::new(agent)).await?;
//!
//!     for function in registry.to_openai_functions() {
//!         println!("{}", function);
//!     }
//!
//!     let result = registry
//!         .execute_tool("get_weather", serde_json::json!({"city": "Paris"}))
//!         .await?;
//!     println!("{}", result.output);
//!     Ok(())
//! }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Applications embedding SkillKit opt in to `RUST_LOG` driven diagnostics by calling this;
/// libraries should leave logger selection to the application.
///
/// ```rust
/// skillkit::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

pub mod skillkit;

// Re-exporting key items for easier external access.
pub use skillkit::agent::Agent;
pub use skillkit::client_wrapper;
pub use skillkit::client_wrapper::{ClientWrapper, Message, Role, TokenUsage};
pub use skillkit::clients;
pub use skillkit::config;
pub use skillkit::config::{ConfigError, SkillKitConfig};
pub use skillkit::tool_protocol;
pub use skillkit::tool_protocol::{ToolError, ToolRegistry, ToolResult};
pub use skillkit::tool_protocols;
pub use skillkit::tools;
