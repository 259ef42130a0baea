use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Message, MovieCard, Sender};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default)]
    pub user_session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub text: String,
    pub movies: Vec<MovieCard>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Process one chat turn
///
/// Validates the required fields, delegates to the chat service, and
/// optionally persists both turns. Persistence failures are logged but never
/// fail the reply.
pub async fn process_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> AppResult<Json<MessageResponse>> {
    let session_id = request.user_session_id.filter(|s| !s.is_empty());
    let message = request.message.filter(|m| !m.is_empty());

    let (session_id, message) = match (session_id, message) {
        (Some(session_id), Some(message)) => (session_id, message),
        _ => {
            return Err(AppError::InvalidInput(
                "Missing userSessionId or message".to_string(),
            ))
        }
    };

    if state.persist_chat {
        let user_turn = Message::new(Sender::User, message.clone(), vec![]);
        if let Err(e) = state.history.append(&session_id, &user_turn).await {
            tracing::warn!(error = %e, "Failed to persist user turn");
        }
    }

    let reply = state
        .chat
        .handle(&message, request.platform.as_deref())
        .await;

    if state.persist_chat {
        let bot_turn = Message::new(Sender::Bot, reply.text.clone(), reply.movies.clone());
        if let Err(e) = state.history.append(&session_id, &bot_turn).await {
            tracing::warn!(error = %e, "Failed to persist bot turn");
        }
    }

    Ok(Json(MessageResponse {
        text: reply.text,
        movies: reply.movies,
    }))
}

/// Fetch a session's message log
pub async fn get_history(
    State(state): State<AppState>,
    Path(user_session_id): Path<String>,
) -> AppResult<Json<Vec<Message>>> {
    let messages = state.history.history(&user_session_id).await?;
    Ok(Json(messages))
}
