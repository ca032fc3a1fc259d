//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `parley-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool, writes on the single writer connection.

use chrono::{DateTime, Utc};
use parley_core::chat::repository::ChatRepository;
use parley_types::chat::{ChatExchange, ChatSession};
use parley_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct SessionRow {
    id: String,
    title: String,
    created_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        Ok(ChatSession {
            id,
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatExchange.
struct ExchangeRow {
    id: String,
    session_id: String,
    user_message: String,
    bot_message: String,
    created_at: String,
}

impl ExchangeRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_message: row.try_get("user_message")?,
            bot_message: row.try_get("bot_message")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_exchange(self) -> Result<ChatExchange, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid exchange id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        Ok(ChatExchange {
            id,
            session_id,
            user_message: self.user_message,
            bot_message: self.bot_message,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO sessions (id, title, created_at) VALUES (?, ?, ?)")
            .bind(session.id.to_string())
            .bind(&session.title)
            .bind(format_datetime(&session.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row =
                    SessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM sessions ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }
        Ok(sessions)
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<bool, RepositoryError> {
        // Messages cascade via the FK.
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_title(&self, session_id: &Uuid, title: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE sessions SET title = ? WHERE id = ?")
            .bind(title)
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn save_exchange(&self, exchange: &ChatExchange) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, session_id, user_message, bot_message, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(exchange.id.to_string())
        .bind(exchange.session_id.to_string())
        .bind(&exchange.user_message)
        .bind(&exchange.bot_message)
        .bind(format_datetime(&exchange.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn get_history(&self, session_id: &Uuid) -> Result<Vec<ChatExchange>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM messages WHERE session_id = ? ORDER BY created_at ASC")
                .bind(session_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut exchanges = Vec::with_capacity(rows.len());
        for row in &rows {
            let exchange_row =
                ExchangeRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            exchanges.push(exchange_row.into_exchange()?);
        }
        Ok(exchanges)
    }

    async fn exchange_count(&self, session_id: &Uuid) -> Result<u32, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count as u32)
    }

    async fn clear_history(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }
}
