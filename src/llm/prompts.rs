// Prompt construction for the completion fallback path.

/// Instruction preamble placed ahead of the tabular context in every system
/// prompt.
pub const SYSTEM_PROMPT_ANALYST: &str = "You are a financial assistant AI.";

/// Builds the full system prompt: preamble, the summarized financial data,
/// and the answering instructions.
pub fn build_system_prompt(context: &str) -> String {
    format!(
        "{preamble} Here is the company financial data:\n\n{context}\n\n\
         Answer clearly and accurately, using the financial data for your \
         analysis report.\nIf no data is available, answer generally.",
        preamble = SYSTEM_PROMPT_ANALYST,
        context = context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_context_verbatim() {
        let context = "| Fiscal Year | Total Revenue |\n| --- | --- |\n| 2023 | 100 |\n";
        let prompt = build_system_prompt(context);
        assert!(prompt.starts_with(SYSTEM_PROMPT_ANALYST));
        assert!(prompt.contains(context));
        assert!(prompt.ends_with("If no data is available, answer generally."));
    }
}
