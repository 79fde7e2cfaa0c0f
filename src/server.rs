use crate::chatbot::FinancialChatbot;
use crate::error::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub type AppState = Arc<FinancialChatbot>;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub text: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Missing, malformed, or empty-after-trim request text is a validation
/// failure; everything else produces a 200 with a reply, degraded or not.
async fn chat_handler(
    State(state): State<AppState>,
    body: Option<Json<ChatRequest>>,
) -> Response {
    let text = body.map(|Json(request)| request.text).unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "text is required" })),
        )
            .into_response();
    }

    info!("chat request: {}", text);
    let reply = state.respond(text).await;
    Json(json!({ "response": reply })).into_response()
}

/// Binds the listener and serves until the process is terminated.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
