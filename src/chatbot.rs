use crate::llm::{build_system_prompt, CompletionClient};
use crate::model::FinancialTable;
use crate::rules;
use crate::summary::{self, DEFAULT_MAX_YEARS};
use log::{debug, warn};
use std::sync::Arc;

/// Answers chat queries: deterministic rule-based answers first, then a
/// completion grounded with a summarized slice of the table.
pub struct FinancialChatbot {
    table: Arc<FinancialTable>,
    client: CompletionClient,
}

impl FinancialChatbot {
    pub fn new(table: Arc<FinancialTable>, client: CompletionClient) -> Self {
        Self { table, client }
    }

    pub fn table(&self) -> &FinancialTable {
        &self.table
    }

    /// Produces the reply for one user query. A completion failure degrades
    /// to an error-prefixed reply; this method itself never fails, so the
    /// process keeps serving subsequent requests.
    pub async fn respond(&self, text: &str) -> String {
        if let Some(answer) = rules::rule_based_response(text, &self.table) {
            debug!("rule-based answer for query: {}", text);
            return answer;
        }

        let company = rules::detect_company(text);
        let context = summary::summarize_context(&self.table, company, DEFAULT_MAX_YEARS);
        let system_prompt = build_system_prompt(&context);

        match self.client.complete(&system_prompt, text).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("completion failed: {}", err);
                format!("LLM Error: {}", err)
            }
        }
    }
}
