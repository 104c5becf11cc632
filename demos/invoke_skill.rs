//! Invoke one skill from the command line.
//!
//! ```text
//! cargo run --example invoke_skill -- --list
//! OPEN_AI_SECRET=... cargo run --example invoke_skill -- get_weather '{"city": "Paris"}'
//! OPEN_AI_SECRET=... cargo run --example invoke_skill -- get_banking_data '{"query": "last 5 deposits"}'
//! ```

use skillkit::tools::{skill_catalog, skill_registry};
use skillkit::{Agent, SkillKitConfig};
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    skillkit::init_logger();

    let mut args = std::env::args().skip(1);
    let tool_name = args
        .next()
        .ok_or("usage: invoke_skill <tool_name> [json-arguments] | --list")?;

    if tool_name == "--list" {
        for function in skill_catalog().await? {
            println!("{}", serde_json::to_string_pretty(&function)?);
        }
        return Ok(());
    }

    let config = SkillKitConfig::from_env()?;
    let agent = Agent::new(Arc::new(config.build_client())).with_timeout(config.request_timeout);
    let registry = skill_registry(Arc::new(agent)).await?;

    let parameters: serde_json::Value = match args.next() {
        Some(raw) => serde_json::from_str(&raw)?,
        None => serde_json::json!({}),
    };

    let result = registry.execute_tool(&tool_name, parameters).await?;
    match result.as_text() {
        Some(text) => println!("{}", text),
        None => println!("{}", result.output),
    }
    Ok(())
}
