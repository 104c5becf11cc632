//! Simulated retrieval back-ends.
//!
//! None of these skills talk to a real document store or database. Each one hands the query to
//! an [`Agent`] that role-plays the back-end through a fixed [`Persona`] and returns whatever the
//! model makes up. The three personas differ only in configuration; they share
//! [`RetrievalPlugin`] as their implementation.

use crate::skillkit::agent::Agent;
use crate::tool_protocol::ToolError;
use std::sync::Arc;

/// Fixed role a retrieval skill asks the model to play, plus how the skill describes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    /// Name the skill is registered under.
    pub tool_name: &'static str,
    /// Human readable description of the skill.
    pub tool_description: &'static str,
    /// Description of the `query` argument.
    pub query_description: &'static str,
    /// Description of the returned text.
    pub returns_description: &'static str,
    /// Identifier of the simulated agent.
    pub agent_id: &'static str,
    /// What the simulated agent returns.
    pub agent_description: &'static str,
    /// System instructions sent with every query.
    pub instructions: &'static str,
    /// Label used in log lines.
    pub label: &'static str,
}

/// BMW 320i car insurance knowledge base (retrieval-augmented generation stand-in).
pub const INSURANCE_KNOWLEDGE_BASE: Persona = Persona {
    tool_name: "get_insurance_context",
    tool_description: "Retrieves context about BMW 320i car insurance policy",
    query_description: "The question about BMW 320i insurance policy",
    returns_description: "The retrieved context from insurance documents",
    agent_id: "RAGAgent",
    agent_description: "This agent returns the context retrieved from insurance documents.",
    instructions: "You are a BMW 320i car insurance knowledge base. Return relevant context for \
                   queries about coverage, premiums, deductibles, and claims. Keep responses \
                   concise and factual.",
    label: "RAG context",
};

/// Banking transaction database (natural language to SQL stand-in).
pub const BANKING_DATABASE: Persona = Persona {
    tool_name: "get_banking_data",
    tool_description:
        "Converts natural language to SQL and returns banking transaction results",
    query_description: "The question about banking transactions",
    returns_description: "The retrieved banking transaction data",
    agent_id: "SQLAgent",
    agent_description: "This agent returns transaction data from SQL database.",
    instructions: "You are a banking transaction database. Return fake transaction data for \
                   queries about account balances, spending, deposits, and transaction history. \
                   Format as simple JSON or text.",
    label: "Banking data",
};

/// Sales-analytics document store for a smart city IoT company.
pub const SALES_ANALYTICS_STORE: Persona = Persona {
    tool_name: "get_sales_analysis",
    tool_description:
        "Retrieves sales analysis data for smart city IoT solutions from Cosmos DB",
    query_description: "The question about last year's sales analysis",
    returns_description: "The retrieved sales analysis documents in JSON format",
    agent_id: "CosmosAgent",
    agent_description: "This agent returns sales analysis documents from Cosmos DB.",
    instructions: "You are a Cosmos DB containing multimodal sales analysis documents for a smart \
                   city IoT solutions company. Return fake JSON data about sales metrics, product \
                   performance, and market analysis from last year.",
    label: "Sales analysis",
};

/// Every retrieval persona, in registration order.
pub const PERSONAS: [Persona; 3] = [
    INSURANCE_KNOWLEDGE_BASE,
    BANKING_DATABASE,
    SALES_ANALYTICS_STORE,
];

/// A retrieval skill: one persona on a shared generation client.
#[derive(Clone)]
pub struct RetrievalPlugin {
    persona: Persona,
    agent: Arc<Agent>,
}

impl RetrievalPlugin {
    pub fn new(persona: Persona, agent: Arc<Agent>) -> Self {
        Self { persona, agent }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Answer `query` in character.
    pub async fn retrieve(&self, query: &str) -> Result<String, ToolError> {
        let content = self.agent.generate(self.persona.instructions, query).await?;
        log::info!(
            "{} retrieved by {} for: {}",
            self.persona.label,
            self.persona.agent_id,
            query
        );
        Ok(content)
    }
}
