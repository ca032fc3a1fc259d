//! Chat session and exchange types for Parley.
//!
//! A session is one conversation thread; an exchange is one user message
//! paired with the bot reply it produced. Exchanges are stored as a single
//! row, not two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder title assigned to every session at creation.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Maximum number of characters of the first user message used as the title.
pub const TITLE_MAX_CHARS: usize = 30;

/// A chat session (conversation thread).
///
/// `title` holds [`DEFAULT_SESSION_TITLE`] until the first exchange is
/// saved, at which point it is rewritten once from the first user message.
/// `created_at` exists only for descending sort order when listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a fresh session with the default placeholder title.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// One user/bot message pair within a session.
///
/// Ordered by `created_at` ascending when retrieving history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_message: String,
    pub bot_message: String,
    pub created_at: DateTime<Utc>,
}

impl ChatExchange {
    /// Create an exchange pairing a user message with the bot reply.
    pub fn new(session_id: Uuid, user_message: String, bot_message: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            user_message,
            bot_message,
            created_at: Utc::now(),
        }
    }
}

/// Derive a session title from the first user message.
///
/// Takes the first [`TITLE_MAX_CHARS`] characters and appends `...` iff the
/// message was longer. Character-based so multi-byte input never splits a
/// UTF-8 sequence.
pub fn derive_title(first_message: &str) -> String {
    let mut title: String = first_message.chars().take(TITLE_MAX_CHARS).collect();
    if first_message.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}
