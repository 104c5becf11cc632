//! The registration surface: names, descriptions and argument schemas the calling framework
//! selects skills by, plus invocation of the local skills through the registry.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;
use skillkit::client_wrapper::{ClientWrapper, Message, Role};
use skillkit::tool_protocol::{ToolError, ToolParameterType, ToolRegistry};
use skillkit::tools::{skill_registry, TextAnalysis, WeatherPlugin, DATETIME_FORMAT, SKILL_NAMES};
use skillkit::Agent;
use std::sync::Arc;

struct CannedClient;

#[async_trait]
impl ClientWrapper for CannedClient {
    async fn send_message(
        &self,
        _messages: &[Message],
    ) -> Result<Message, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Message {
            role: Role::Assistant,
            content: "canned".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "canned"
    }
}

async fn registry() -> ToolRegistry {
    let agent = Agent::new(Arc::new(CannedClient));
    skill_registry(Arc::new(agent)).await.unwrap()
}

fn tool_error(err: &(dyn std::error::Error + Send + Sync + 'static)) -> ToolError {
    err.downcast_ref::<ToolError>()
        .cloned()
        .unwrap_or_else(|| panic!("not a ToolError: {}", err))
}

#[tokio::test]
async fn test_all_skills_registered() {
    let registry = registry().await;

    let mut expected: Vec<&str> = SKILL_NAMES.to_vec();
    expected.sort();
    let names: Vec<&str> = registry
        .list_tools()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_descriptions_and_parameters() {
    let registry = registry().await;

    let cases: Vec<(&str, &str, Vec<(&str, ToolParameterType, &str)>, &str)> = vec![
        (
            "get_weather",
            "Gets the current weather for a city",
            vec![(
                "city",
                ToolParameterType::String,
                "The name of the city to get weather for",
            )],
            "The current weather information",
        ),
        (
            "generate_random_number",
            "Generates a random number between min and max values",
            vec![
                ("min_val", ToolParameterType::Integer, "The minimum value (inclusive)"),
                ("max_val", ToolParameterType::Integer, "The maximum value (inclusive)"),
            ],
            "A random number between min and max",
        ),
        (
            "get_current_datetime",
            "Gets the current date and time",
            vec![],
            "The current date and time",
        ),
        (
            "analyze_text",
            "Analyzes text and returns statistics",
            vec![("text", ToolParameterType::String, "The text to analyze")],
            "JSON string containing text analysis results",
        ),
        (
            "get_insurance_context",
            "Retrieves context about BMW 320i car insurance policy",
            vec![(
                "query",
                ToolParameterType::String,
                "The question about BMW 320i insurance policy",
            )],
            "The retrieved context from insurance documents",
        ),
        (
            "get_banking_data",
            "Converts natural language to SQL and returns banking transaction results",
            vec![(
                "query",
                ToolParameterType::String,
                "The question about banking transactions",
            )],
            "The retrieved banking transaction data",
        ),
        (
            "get_sales_analysis",
            "Retrieves sales analysis data for smart city IoT solutions from Cosmos DB",
            vec![(
                "query",
                ToolParameterType::String,
                "The question about last year's sales analysis",
            )],
            "The retrieved sales analysis documents in JSON format",
        ),
    ];

    for (name, description, params, returns) in cases {
        let metadata = registry.get_tool(name).unwrap().metadata();
        assert_eq!(metadata.description, description, "{}", name);
        assert_eq!(metadata.parameters.len(), params.len(), "{}", name);
        for (param, (param_name, param_type, param_description)) in
            metadata.parameters.iter().zip(params)
        {
            assert_eq!(param.name, param_name);
            assert_eq!(param.param_type, param_type);
            assert_eq!(param.description.as_deref(), Some(param_description));
            assert!(param.required);
        }
        assert_eq!(
            metadata.returns.as_ref().map(|r| r.description.as_str()),
            Some(returns),
            "{}",
            name
        );
    }
}

#[tokio::test]
async fn test_openai_function_schema() {
    let registry = registry().await;
    let functions = registry.to_openai_functions();
    assert_eq!(functions.len(), 7);

    let random = functions
        .iter()
        .find(|f| f["name"] == "generate_random_number")
        .unwrap();
    assert_eq!(
        random["parameters"]["properties"]["min_val"]["type"],
        "integer"
    );
    assert_eq!(
        random["parameters"]["required"],
        json!(["min_val", "max_val"])
    );

    let datetime = functions
        .iter()
        .find(|f| f["name"] == "get_current_datetime")
        .unwrap();
    assert_eq!(datetime["parameters"]["required"], json!([]));
}

#[tokio::test]
async fn test_get_weather() {
    let registry = registry().await;
    let forecasts = WeatherPlugin::new().forecasts("Paris");

    let result = registry
        .execute_tool("get_weather", json!({"city": "Paris"}))
        .await
        .unwrap();
    let weather = result.as_text().unwrap();
    assert!(weather.contains("Paris"));
    assert!(forecasts.iter().any(|f| f == weather), "{}", weather);
}

#[tokio::test]
async fn test_generate_random_number() {
    let registry = registry().await;

    for _ in 0..20 {
        let result = registry
            .execute_tool("generate_random_number", json!({"min_val": -3, "max_val": 3}))
            .await
            .unwrap();
        let v = result.output.as_i64().unwrap();
        assert!((-3..=3).contains(&v));
    }

    let result = registry
        .execute_tool("generate_random_number", json!({"min_val": "10", "max_val": "10"}))
        .await
        .unwrap();
    assert_eq!(result.output, json!(10));
}

#[tokio::test]
async fn test_inverted_range_is_invalid_argument() {
    let registry = registry().await;
    let err = registry
        .execute_tool("generate_random_number", json!({"min_val": 5, "max_val": 1}))
        .await
        .unwrap_err();
    assert!(matches!(tool_error(&*err), ToolError::InvalidParameters(_)));
}

#[tokio::test]
async fn test_missing_or_mistyped_arguments() {
    let registry = registry().await;

    let calls = vec![
        ("get_weather", json!({})),
        ("get_weather", json!({"city": 42})),
        ("generate_random_number", json!({"min_val": 1})),
        ("generate_random_number", json!({"min_val": 1.5, "max_val": 3})),
        ("analyze_text", json!({"body": "wrong key"})),
        ("get_banking_data", json!({})),
    ];
    for (name, params) in calls {
        let err = registry.execute_tool(name, params).await.unwrap_err();
        assert!(
            matches!(tool_error(&*err), ToolError::InvalidParameters(_)),
            "{}: {}",
            name,
            err
        );
    }
}

#[tokio::test]
async fn test_get_current_datetime() {
    let registry = registry().await;
    let result = registry
        .execute_tool("get_current_datetime", json!({}))
        .await
        .unwrap();

    let text = result.as_text().unwrap();
    let parsed = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).unwrap();
    let drift = chrono::Local::now().naive_local() - parsed;
    assert!(drift.num_seconds().abs() <= 5);
}

#[tokio::test]
async fn test_analyze_text_returns_json_text() {
    let registry = registry().await;

    let result = registry
        .execute_tool("analyze_text", json!({"text": "Hi there. Go!"}))
        .await
        .unwrap();
    let analysis: TextAnalysis = serde_json::from_str(result.as_text().unwrap()).unwrap();
    assert_eq!(
        analysis,
        TextAnalysis {
            character_count: 13,
            word_count: 3,
            sentence_count: 2,
            average_word_length: 3.67,
        }
    );

    let result = registry
        .execute_tool("analyze_text", json!({"text": ""}))
        .await
        .unwrap();
    let analysis: serde_json::Value = serde_json::from_str(result.as_text().unwrap()).unwrap();
    assert_eq!(analysis["character_count"], 0);
    assert_eq!(analysis["word_count"], 0);
    assert_eq!(analysis["sentence_count"], 0);
    assert_eq!(analysis["average_word_length"].as_f64(), Some(0.0));
    assert!(analysis["average_word_length"].is_u64());
    assert_eq!(
        result.as_text(),
        Some(r#"{"character_count": 0, "word_count": 0, "sentence_count": 0, "average_word_length": 0}"#)
    );
}

#[tokio::test]
async fn test_unknown_skill() {
    let registry = registry().await;
    let err = registry
        .execute_tool("get_stock_price", json!({}))
        .await
        .unwrap_err();
    assert_eq!(
        tool_error(&*err),
        ToolError::NotFound("get_stock_price".to_string())
    );
}
