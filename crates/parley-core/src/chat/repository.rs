//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chat sessions and exchanges. Implementations
//! live in parley-infra (e.g., `SqliteChatRepository`). Uses native async fn
//! in traits (RPITIT, Rust 2024 edition).

use parley_types::chat::{ChatExchange, ChatSession};
use parley_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and exchange persistence.
pub trait ChatRepository: Send + Sync {
    /// Insert a new session row.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List all sessions, ordered by created_at DESC. Unbounded.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Delete a session row; its exchanges cascade. Returns whether a row
    /// was actually deleted.
    fn delete_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Overwrite a session's title.
    fn set_title(
        &self,
        session_id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert one exchange (user/bot message pair).
    fn save_exchange(
        &self,
        exchange: &ChatExchange,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all exchanges for a session, ordered by created_at ASC.
    fn get_history(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatExchange>, RepositoryError>> + Send;

    /// Number of exchanges stored for a session.
    fn exchange_count(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u32, RepositoryError>> + Send;

    /// Delete all exchanges for a session, leaving the session row intact.
    fn clear_history(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
