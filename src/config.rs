use std::env;

pub const DEFAULT_DATA_PATH: &str = "financial_analysis_results.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Service configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the tabular dataset (`DATA_PATH`).
    pub data_path: String,
    /// API key for the completion endpoint (`GROQ_API_KEY`).
    pub groq_api_key: String,
    /// Listen address for the HTTP server (`BIND_ADDR`).
    pub bind_addr: String,
    /// Optional completion model override (`GROQ_MODEL`).
    pub model: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_path: env_or("DATA_PATH", DEFAULT_DATA_PATH),
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            model: env::var("GROQ_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty()),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
