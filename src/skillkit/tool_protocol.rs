//! Tool descriptions, the protocol seam, and the name-keyed registry.
//!
//! A skill is described by [`ToolMetadata`]: its name, what it does, the typed arguments it
//! takes and what comes back. Execution goes through the [`ToolProtocol`] trait so the registry
//! never needs to know how a skill is implemented. Callers discover skills with
//! [`ToolRegistry::list_tools`] or [`ToolRegistry::to_openai_functions`] and invoke them by name
//! with a JSON object of arguments.
//!
//! ```text
//! caller → ToolRegistry → Tool → dyn ToolProtocol (CustomToolProtocol) → skill closure
//! ```
//!
//! # Example
//!
//! ```rust
//! use skillkit::tool_protocol::{ToolMetadata, ToolParameter, ToolParameterType};
//!
//! let metadata = ToolMetadata::new("get_weather", "Gets the current weather for a city")
//!     .with_parameter(
//!         ToolParameter::new("city", ToolParameterType::String)
//!             .with_description("The name of the city to get weather for")
//!             .required(),
//!     )
//!     .with_returns(ToolParameterType::String, "The current weather information");
//! assert_eq!(metadata.parameters.len(), 1);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// What a skill handed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    /// The skill's payload: a JSON string for text skills, a JSON integer for
    /// `generate_random_number`.
    pub output: JsonValue,
    /// Side information about the call, e.g. which simulated agent answered.
    pub metadata: HashMap<String, JsonValue>,
}

impl ToolResult {
    pub fn success(output: JsonValue) -> Self {
        ToolResult {
            success: true,
            output,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Borrow the payload when it is a string.
    pub fn as_text(&self) -> Option<&str> {
        self.output.as_str()
    }
}

/// JSON-schema type names used for arguments and return values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ToolParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// One named argument of a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ToolParameterType,
    pub description: Option<String>,
    pub required: bool,
}

impl ToolParameter {
    /// An optional, undescribed argument; chain the builders below to refine it.
    pub fn new(name: impl Into<String>, param_type: ToolParameterType) -> Self {
        ToolParameter {
            name: name.into(),
            param_type,
            description: None,
            required: false,
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        ToolParameter {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn required(self) -> Self {
        ToolParameter {
            required: true,
            ..self
        }
    }
}

/// Type and description of what a tool returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolReturn {
    #[serde(rename = "type")]
    pub return_type: ToolParameterType,
    pub description: String,
}

/// Everything a caller needs to know to invoke a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
    pub returns: Option<ToolReturn>,
    /// Extra descriptive fields, e.g. the simulated agent behind a retrieval skill.
    pub protocol_metadata: HashMap<String, JsonValue>,
}

impl ToolMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        ToolMetadata {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            returns: None,
            protocol_metadata: HashMap::new(),
        }
    }

    /// Arguments keep the order they are added in.
    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_returns(
        self,
        return_type: ToolParameterType,
        description: impl Into<String>,
    ) -> Self {
        ToolMetadata {
            returns: Some(ToolReturn {
                return_type,
                description: description.into(),
            }),
            ..self
        }
    }

    pub fn with_protocol_metadata(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.protocol_metadata.insert(key.into(), value);
        self
    }

    /// Function-calling schema: `{name, description, parameters: {type: "object", ...}}`.
    pub fn to_openai_function(&self) -> JsonValue {
        let properties: Map<String, JsonValue> = self
            .parameters
            .iter()
            .map(|p| {
                let schema = json!({
                    "type": p.param_type,
                    "description": p.description.clone().unwrap_or_default(),
                });
                (p.name.clone(), schema)
            })
            .collect();

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

/// Something that can run skills by name and describe them.
#[async_trait]
pub trait ToolProtocol: Send + Sync {
    async fn execute(
        &self,
        tool_name: &str,
        parameters: JsonValue,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>>;

    async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>>;

    async fn get_tool_metadata(
        &self,
        tool_name: &str,
    ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>>;

    /// Short identifier used in log lines.
    fn protocol_name(&self) -> &str;
}

/// Failure kinds a skill invocation can end in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// No skill is registered under the requested name.
    NotFound(String),
    /// The skill ran but could not produce its result.
    ExecutionFailed(String),
    /// Arguments are missing, mistyped, or an invalid combination (e.g. an inverted range).
    InvalidParameters(String),
    /// The text generation service failed, timed out, or produced nothing.
    RetrievalUnavailable(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, detail) = match self {
            ToolError::NotFound(name) => ("unknown skill", name),
            ToolError::ExecutionFailed(msg) => ("skill failed", msg),
            ToolError::InvalidParameters(msg) => ("invalid arguments", msg),
            ToolError::RetrievalUnavailable(msg) => ("retrieval unavailable", msg),
        };
        write!(f, "{}: {}", kind, detail)
    }
}

impl Error for ToolError {}

/// A described skill bound to the protocol that runs it.
pub struct Tool {
    metadata: ToolMetadata,
    protocol: Arc<dyn ToolProtocol>,
}

impl Tool {
    pub fn from_metadata(metadata: ToolMetadata, protocol: Arc<dyn ToolProtocol>) -> Self {
        Tool { metadata, protocol }
    }

    pub fn metadata(&self) -> &ToolMetadata {
        &self.metadata
    }

    pub async fn execute(
        &self,
        parameters: JsonValue,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        self.protocol.execute(&self.metadata.name, parameters).await
    }
}

/// Name-keyed collection of [`Tool`]s.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every tool `protocol` advertises right now.
    pub async fn from_protocol(
        protocol: Arc<dyn ToolProtocol>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mut registry = Self::new();
        for metadata in protocol.list_tools().await? {
            log::debug!(
                "{} skill '{}' added to registry",
                protocol.protocol_name(),
                metadata.name
            );
            registry.add_tool(Tool::from_metadata(metadata, protocol.clone()));
        }
        Ok(registry)
    }

    /// Insert `tool`, replacing any previous tool of the same name.
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.insert(tool.metadata.name.clone(), tool);
    }

    pub fn get_tool(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Metadata of every tool, ordered by name.
    pub fn list_tools(&self) -> Vec<&ToolMetadata> {
        let mut listed: Vec<&ToolMetadata> =
            self.tools.values().map(Tool::metadata).collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        listed
    }

    /// [`ToolMetadata::to_openai_function`] for every tool, ordered by name.
    pub fn to_openai_functions(&self) -> Vec<JsonValue> {
        self.list_tools()
            .into_iter()
            .map(ToolMetadata::to_openai_function)
            .collect()
    }

    /// Run the tool called `tool_name`; unknown names fail with [`ToolError::NotFound`].
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: JsonValue,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        match self.tools.get(tool_name) {
            Some(tool) => tool.execute(parameters).await,
            None => Err(Box::new(ToolError::NotFound(tool_name.to_string()))),
        }
    }
}
