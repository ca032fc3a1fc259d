//! HTTP route handlers.
//!
//! Pure dispatch: each handler resolves the acting session, calls exactly
//! one service method, and serializes the result in the wire shapes the
//! front end expects.

pub mod index;
pub mod message;
pub mod session;
pub mod upload;

use serde::Serialize;
use uuid::Uuid;

use parley_types::chat::ChatExchange;

use crate::http::error::AppError;
use crate::state::AppState;

/// Wire shape of one history entry: just the message pair.
#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub user_message: String,
    pub bot_message: String,
}

impl From<ChatExchange> for HistoryItem {
    fn from(exchange: ChatExchange) -> Self {
        Self {
            user_message: exchange.user_message,
            bot_message: exchange.bot_message,
        }
    }
}

/// Resolve the browser's current session, creating one when it is absent or
/// its row no longer exists.
///
/// Returns the session id plus a `Set-Cookie` value when a fresh cookie must
/// be issued. Idempotent per browser otherwise.
pub async fn ensure_session(
    state: &AppState,
    current: Option<Uuid>,
) -> Result<(Uuid, Option<String>), AppError> {
    if let Some(id) = current {
        if state.chat_service.get_session(&id).await?.is_some() {
            return Ok((id, None));
        }
    }

    let session = state.chat_service.create_session().await?;
    let cookie = state.session_key.cookie_for(&session.id);
    Ok((session.id, Some(cookie)))
}
