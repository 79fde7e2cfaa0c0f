use dotenv::dotenv;
use financial_insight_chat::chatbot::FinancialChatbot;
use financial_insight_chat::config::Config;
use financial_insight_chat::llm::CompletionClient;
use financial_insight_chat::{loader, server};
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let table = match loader::load(&config.data_path) {
        Ok(table) => table,
        Err(err) => {
            error!(
                "failed to load financial data from {}: {}",
                config.data_path, err
            );
            return ExitCode::FAILURE;
        }
    };

    let client = match config.model.clone() {
        Some(model) => CompletionClient::with_model(config.groq_api_key.clone(), model),
        None => CompletionClient::new(config.groq_api_key.clone()),
    };
    let chatbot = Arc::new(FinancialChatbot::new(Arc::new(table), client));

    info!("starting chat service on {}", config.bind_addr);
    if let Err(err) = server::serve(&config.bind_addr, chatbot).await {
        error!("server error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
