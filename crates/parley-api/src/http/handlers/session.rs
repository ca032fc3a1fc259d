//! Session lifecycle handlers.
//!
//! Endpoints:
//! - POST /new_chat      - Create a session and make it current
//! - POST /switch_chat   - Make an existing session current, return history
//! - POST /delete_chat   - Delete a session (re-point the browser if needed)
//! - GET  /get_sessions  - List sessions plus the browser's current one

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::http::browser::BrowserSession;
use crate::http::error::AppError;
use crate::http::handlers::HistoryItem;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionIdRequest {
    pub session_id: String,
}

/// POST /new_chat - Create a session and point the browser at it.
pub async fn new_chat(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.chat_service.create_session().await?;
    let cookie = state.session_key.cookie_for(&session.id);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({"session_id": session.id})),
    )
        .into_response())
}

/// POST /switch_chat - Switch the browser to an existing session.
///
/// An unknown (or malformed) id answers `{"success": false}` and leaves the
/// current session untouched.
pub async fn switch_chat(
    State(state): State<AppState>,
    Json(body): Json<SessionIdRequest>,
) -> Result<Response, AppError> {
    let Ok(session_id) = body.session_id.parse::<Uuid>() else {
        return Err(AppError::Lookup);
    };

    match state.chat_service.switch_session(&session_id).await? {
        Some(history) => {
            let history: Vec<HistoryItem> = history.into_iter().map(Into::into).collect();
            let cookie = state.session_key.cookie_for(&session_id);
            Ok((
                AppendHeaders([(SET_COOKIE, cookie)]),
                Json(json!({"success": true, "history": history})),
            )
                .into_response())
        }
        None => Err(AppError::Lookup),
    }
}

/// POST /delete_chat - Delete a session; messages cascade.
///
/// When the deleted session was the browser's current one, a replacement is
/// created and made current, so a browser is never left without a session.
pub async fn delete_chat(
    State(state): State<AppState>,
    BrowserSession(current): BrowserSession,
    Json(body): Json<SessionIdRequest>,
) -> Result<Response, AppError> {
    if let Ok(session_id) = body.session_id.parse::<Uuid>() {
        state.chat_service.delete_session(&session_id).await?;

        if current == Some(session_id) {
            let replacement = state.chat_service.create_session().await?;
            let cookie = state.session_key.cookie_for(&replacement.id);
            return Ok((
                AppendHeaders([(SET_COOKIE, cookie)]),
                Json(json!({"success": true, "current_session": replacement.id})),
            )
                .into_response());
        }
    }

    Ok(Json(json!({"success": true, "current_session": current})).into_response())
}

/// GET /get_sessions - All sessions (newest first) plus the current one.
pub async fn get_sessions(
    State(state): State<AppState>,
    BrowserSession(current): BrowserSession,
) -> Result<Response, AppError> {
    let sessions = state.chat_service.list_sessions().await?;
    Ok(Json(json!({"sessions": sessions, "current": current})).into_response())
}
