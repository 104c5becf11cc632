//! Built-in Skills
//!
//! Seven mock skills an agent framework can discover and call by name.
//!
//! # Available Skills
//!
//! | Tool | Arguments | Backed by |
//! |---|---|---|
//! | `get_weather` | `city: string` | [`WeatherPlugin`] |
//! | `generate_random_number` | `min_val: integer`, `max_val: integer` | [`RandomPlugin`] |
//! | `get_current_datetime` | none | [`DateTimePlugin`] |
//! | `analyze_text` | `text: string` | [`TextAnalysisPlugin`] |
//! | `get_insurance_context` | `query: string` | [`RetrievalPlugin`] + [`INSURANCE_KNOWLEDGE_BASE`] |
//! | `get_banking_data` | `query: string` | [`RetrievalPlugin`] + [`BANKING_DATABASE`] |
//! | `get_sales_analysis` | `query: string` | [`RetrievalPlugin`] + [`SALES_ANALYTICS_STORE`] |
//!
//! The first four compute their answer locally. The retrieval skills ask an [`Agent`] to
//! role-play a data source and return the generated text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use skillkit::{Agent, SkillKitConfig};
//! use skillkit::tools::skill_registry;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = SkillKitConfig::from_env()?;
//! let agent = Agent::new(Arc::new(config.build_client()))
//!     .with_timeout(config.request_timeout);
//!
//! let registry = skill_registry(Arc::new(agent)).await?;
//! let result = registry
//!     .execute_tool("generate_random_number", serde_json::json!({"min_val": 1, "max_val": 6}))
//!     .await?;
//! println!("{}", result.output);
//! # Ok(())
//! # }
//! ```

pub mod datetime;
pub mod random;
pub mod retrieval;
pub mod text_analysis;
pub mod weather;

pub use datetime::{DateTimePlugin, DATETIME_FORMAT};
pub use random::RandomPlugin;
pub use retrieval::{
    Persona, RetrievalPlugin, BANKING_DATABASE, INSURANCE_KNOWLEDGE_BASE, PERSONAS,
    SALES_ANALYTICS_STORE,
};
pub use text_analysis::{TextAnalysis, TextAnalysisPlugin};
pub use weather::WeatherPlugin;

use crate::client_wrapper::{ClientWrapper, Message};
use crate::skillkit::agent::Agent;
use crate::tool_protocol::{
    ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolRegistry, ToolResult,
};
use crate::tool_protocols::CustomToolProtocol;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::error::Error;
use std::sync::Arc;

/// Names of every skill, in registration order.
pub const SKILL_NAMES: [&str; 7] = [
    "get_weather",
    "generate_random_number",
    "get_current_datetime",
    "analyze_text",
    "get_insurance_context",
    "get_banking_data",
    "get_sales_analysis",
];

fn required_str<'a>(params: &'a JsonValue, name: &str) -> Result<&'a str, ToolError> {
    match params.get(name) {
        Some(JsonValue::String(value)) => Ok(value),
        Some(other) => Err(ToolError::InvalidParameters(format!(
            "'{}' must be a string, got {}",
            name, other
        ))),
        None => Err(ToolError::InvalidParameters(format!(
            "Missing '{}' parameter",
            name
        ))),
    }
}

/// Integers may arrive as JSON numbers or, from looser callers, as integer strings.
fn required_i64(params: &JsonValue, name: &str) -> Result<i64, ToolError> {
    let value = params
        .get(name)
        .ok_or_else(|| ToolError::InvalidParameters(format!("Missing '{}' parameter", name)))?;

    let parsed = match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        ToolError::InvalidParameters(format!("'{}' must be an integer, got {}", name, value))
    })
}

fn string_parameter(name: &str, description: &str) -> ToolParameter {
    ToolParameter::new(name, ToolParameterType::String)
        .with_description(description)
        .required()
}

fn integer_parameter(name: &str, description: &str) -> ToolParameter {
    ToolParameter::new(name, ToolParameterType::Integer)
        .with_description(description)
        .required()
}

/// Register the four locally computed skills.
pub async fn register_local_skills(protocol: &CustomToolProtocol) {
    let weather = WeatherPlugin::new();
    protocol
        .register_tool(
            ToolMetadata::new("get_weather", "Gets the current weather for a city")
                .with_parameter(string_parameter(
                    "city",
                    "The name of the city to get weather for",
                ))
                .with_returns(ToolParameterType::String, "The current weather information"),
            Arc::new(move |params| {
                let city = required_str(&params, "city")?;
                Ok(ToolResult::success(JsonValue::from(weather.get_weather(city))))
            }),
        )
        .await;

    let random = RandomPlugin::new();
    protocol
        .register_tool(
            ToolMetadata::new(
                "generate_random_number",
                "Generates a random number between min and max values",
            )
            .with_parameter(integer_parameter("min_val", "The minimum value (inclusive)"))
            .with_parameter(integer_parameter("max_val", "The maximum value (inclusive)"))
            .with_returns(
                ToolParameterType::Integer,
                "A random number between min and max",
            ),
            Arc::new(move |params| {
                let min_val = required_i64(&params, "min_val")?;
                let max_val = required_i64(&params, "max_val")?;
                let value = random.generate_random_number(min_val, max_val)?;
                Ok(ToolResult::success(JsonValue::from(value)))
            }),
        )
        .await;

    let datetime = DateTimePlugin::new();
    protocol
        .register_tool(
            ToolMetadata::new("get_current_datetime", "Gets the current date and time")
                .with_returns(ToolParameterType::String, "The current date and time"),
            Arc::new(move |_params| {
                Ok(ToolResult::success(JsonValue::from(
                    datetime.get_current_datetime(),
                )))
            }),
        )
        .await;

    let text_analysis = TextAnalysisPlugin::new();
    protocol
        .register_tool(
            ToolMetadata::new("analyze_text", "Analyzes text and returns statistics")
                .with_parameter(string_parameter("text", "The text to analyze"))
                .with_returns(
                    ToolParameterType::String,
                    "JSON string containing text analysis results",
                ),
            Arc::new(move |params| {
                let text = required_str(&params, "text")?;
                let json = text_analysis
                    .analyze_text(text)
                    .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
                Ok(ToolResult::success(JsonValue::from(json)))
            }),
        )
        .await;
}

async fn run_retrieval(
    plugin: &RetrievalPlugin,
    params: JsonValue,
) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
    let query = required_str(&params, "query")?;
    let content = plugin.retrieve(query).await?;
    Ok(ToolResult::success(JsonValue::from(content))
        .with_metadata("agent_id", JsonValue::from(plugin.persona().agent_id)))
}

/// Register one simulated retrieval skill for `persona`.
pub async fn register_retrieval_skill(
    protocol: &CustomToolProtocol,
    persona: Persona,
    agent: Arc<Agent>,
) {
    let plugin = RetrievalPlugin::new(persona, agent);
    protocol
        .register_async_tool(
            ToolMetadata::new(persona.tool_name, persona.tool_description)
                .with_parameter(string_parameter("query", persona.query_description))
                .with_returns(ToolParameterType::String, persona.returns_description)
                .with_protocol_metadata("agent_id", JsonValue::from(persona.agent_id))
                .with_protocol_metadata(
                    "agent_description",
                    JsonValue::from(persona.agent_description),
                ),
            Arc::new(move |params| {
                let plugin = plugin.clone();
                Box::pin(async move { run_retrieval(&plugin, params).await })
            }),
        )
        .await;
}

/// Register all seven skills, the retrieval ones sharing `agent`.
pub async fn register_skills(protocol: &CustomToolProtocol, agent: Arc<Agent>) {
    register_local_skills(protocol).await;
    for persona in PERSONAS.iter() {
        register_retrieval_skill(protocol, *persona, agent.clone()).await;
    }
    log::info!("All skills registered: {}", SKILL_NAMES.join(", "));
}

/// Build a [`ToolRegistry`] holding every skill.
pub async fn skill_registry(
    agent: Arc<Agent>,
) -> Result<ToolRegistry, Box<dyn Error + Send + Sync>> {
    let protocol = Arc::new(CustomToolProtocol::new());
    register_skills(&protocol, agent).await;
    ToolRegistry::from_protocol(protocol).await
}

/// Stands in for a model when only the skill descriptions are needed.
struct DetachedClient;

#[async_trait]
impl ClientWrapper for DetachedClient {
    async fn send_message(
        &self,
        _messages: &[Message],
    ) -> Result<Message, Box<dyn Error + Send + Sync>> {
        Err("no generation client configured".into())
    }

    fn model_name(&self) -> &str {
        "none"
    }
}

/// Function-calling schemas of every skill, sorted by name.
///
/// Needs no credentials: the retrieval skills are registered against a client that is never
/// called.
pub async fn skill_catalog() -> Result<Vec<JsonValue>, Box<dyn Error + Send + Sync>> {
    let registry = skill_registry(Arc::new(Agent::new(Arc::new(DetachedClient)))).await?;
    Ok(registry.to_openai_functions())
}
