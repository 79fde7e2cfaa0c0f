//! # Financial Insight Chat
//!
//! A library and service for answering natural-language questions about a
//! small set of companies' financial statements. Questions are answered
//! deterministically from the loaded table where a known pattern matches;
//! everything else falls back to a hosted LLM completion grounded with a
//! compact tabular context summary.
//!
//! ## Core Concepts
//!
//! - **Financial Table**: one record per company per fiscal year, loaded
//!   once at startup, immutable afterwards, with year-over-year growth
//!   metrics derived per company partition
//! - **Rule-based Answer**: an exact, computed answer for a fixed set of
//!   question intents (total revenue, net income trend, top revenue),
//!   evaluated in priority order
//! - **Context Summary**: a bounded markdown table of the most recent
//!   fiscal years, embedded verbatim in the completion system prompt
//! - **Completion**: a single request/response exchange with the external
//!   generative endpoint; failures degrade to an error-prefixed reply
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_insight_chat::*;
//! use std::sync::Arc;
//!
//! let table = loader::load("financial_analysis_results.csv")?;
//!
//! // Deterministic path: no network involved.
//! let answer = rules::rule_based_response("What is Tesla's total revenue?", &table);
//!
//! // Fallback path: summarize context and ask the completion endpoint.
//! let chatbot = FinancialChatbot::new(
//!     Arc::new(table),
//!     CompletionClient::new(std::env::var("GROQ_API_KEY")?),
//! );
//! let reply = chatbot.respond("Is Tesla in better shape than last year?").await;
//! ```

pub mod chatbot;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod model;
pub mod rules;
pub mod server;
pub mod summary;
pub mod utils;

pub use chatbot::FinancialChatbot;
pub use config::Config;
pub use error::{FinancialChatError, Result};
pub use llm::{build_system_prompt, CompletionClient, CompletionError, COMPLETION_MODEL};
pub use loader::load;
pub use model::{Column, FinancialRecord, FinancialTable};
pub use rules::{detect_company, rule_based_response, Intent, PercentChange, COMPANIES};
pub use server::{build_router, serve, AppState, ChatRequest};
pub use summary::{summarize_context, DEFAULT_MAX_YEARS};
pub use utils::format_currency;
