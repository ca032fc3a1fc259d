//! Message exchange handlers.
//!
//! Endpoints:
//! - POST /get_response - Relay a message to the bot, persist the exchange
//! - POST /clear        - Delete a session's history, keep the session
//! - GET  /get_history  - Ordered history for a session

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::http::browser::BrowserSession;
use crate::http::error::AppError;
use crate::http::handlers::{ensure_session, HistoryItem};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetResponseRequest {
    pub message: String,
    #[serde(default)]
    pub has_pdf: bool,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Resolve the acting session id: explicit value first, cookie second.
fn resolve_session(explicit: Option<&str>, cookie: Option<Uuid>) -> Option<Uuid> {
    match explicit {
        Some(raw) => raw.parse().ok(),
        None => cookie,
    }
}

/// POST /get_response - Relay the user message and return the bot reply.
///
/// The session id comes from the body, falling back to the cookie; a browser
/// with neither gets a fresh session, same as a first visit to `/`. The
/// message content is passed through unvalidated, empty included.
pub async fn get_response(
    State(state): State<AppState>,
    BrowserSession(current): BrowserSession,
    Json(body): Json<GetResponseRequest>,
) -> Result<Response, AppError> {
    let resolved = resolve_session(body.session_id.as_deref(), current);
    let known = match resolved {
        Some(id) => state.chat_service.get_session(&id).await?.map(|s| s.id),
        None => None,
    };
    let (session_id, cookie) = match known {
        Some(id) => (id, None),
        None => ensure_session(&state, None).await?,
    };

    let bot = state
        .chat_service
        .send_message(&session_id, &body.message, body.has_pdf)
        .await?;

    let payload = Json(json!({"bot": bot}));
    Ok(match cookie {
        Some(cookie) => (AppendHeaders([(SET_COOKIE, cookie)]), payload).into_response(),
        None => payload.into_response(),
    })
}

/// POST /clear - Empty a session's history; the session row and title stay.
pub async fn clear(
    State(state): State<AppState>,
    BrowserSession(current): BrowserSession,
    Json(body): Json<ClearRequest>,
) -> Result<Response, AppError> {
    if let Some(session_id) = resolve_session(body.session_id.as_deref(), current) {
        state.chat_service.clear_history(&session_id).await?;
    }
    Ok(Json(json!({"status": "cleared"})).into_response())
}

/// GET /get_history - All exchanges for a session, oldest first.
///
/// An unresolvable session answers an empty history rather than an error.
pub async fn get_history(
    State(state): State<AppState>,
    BrowserSession(current): BrowserSession,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, AppError> {
    let history: Vec<HistoryItem> = match resolve_session(query.session_id.as_deref(), current) {
        Some(session_id) => state
            .chat_service
            .get_history(&session_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect(),
        None => Vec::new(),
    };

    Ok(Json(json!({"history": history})).into_response())
}
