use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model identifier pinned for every completion request.
pub const COMPLETION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

const TEMPERATURE: f64 = 0.5;
const MAX_TOKENS: u32 = 300;

/// Failure modes of the completion endpoint. Callers must handle these
/// explicitly; the client never retries.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(&'static str),
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for a Groq-hosted OpenAI-compatible chat completions endpoint.
/// One single-turn request per call with fixed sampling parameters.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, COMPLETION_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GROQ_BASE_URL.to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + user exchange and returns the generated text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_query: &str,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_query,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(
            "requesting completion from {} ({} bytes of system prompt)",
            self.model,
            system_prompt.len()
        );

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatCompletionResponse = res.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::MalformedResponse("empty choices list"))?;

        Ok(choice.message.content)
    }
}
