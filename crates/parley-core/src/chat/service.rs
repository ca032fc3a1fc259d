//! Chat service orchestrating session lifecycle and message exchange.
//!
//! ChatService coordinates between the ChatRepository and the BotResponder
//! collaborator: creating sessions, relaying messages, persisting exchange
//! pairs, and rewriting the session title on the first exchange.

use parley_types::chat::{derive_title, ChatExchange, ChatSession};
use parley_types::error::ChatError;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::collab::BotResponder;

/// Orchestrates chat session lifecycle and message exchange.
///
/// Generic over `ChatRepository` and `BotResponder` to maintain clean
/// architecture (parley-core never depends on parley-infra).
pub struct ChatService<C: ChatRepository, B: BotResponder> {
    repo: C,
    responder: B,
}

impl<C: ChatRepository, B: BotResponder> ChatService<C, B> {
    /// Create a new chat service with the given repository and responder.
    pub fn new(repo: C, responder: B) -> Self {
        Self { repo, responder }
    }

    // --- Session lifecycle ---

    /// Create a new session with the default placeholder title.
    pub async fn create_session(&self) -> Result<ChatSession, ChatError> {
        let session = ChatSession::new();
        self.repo.create_session(&session).await?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    /// Get a session by ID.
    pub async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, ChatError> {
        Ok(self.repo.get_session(session_id).await?)
    }

    /// List all sessions, most recently created first.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.repo.list_sessions().await?)
    }

    /// Switch to an existing session, returning its history.
    ///
    /// Returns `None` when the session does not exist; the caller must leave
    /// its notion of "current session" untouched in that case.
    pub async fn switch_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<Vec<ChatExchange>>, ChatError> {
        if self.repo.get_session(session_id).await?.is_none() {
            debug!(session_id = %session_id, "switch to unknown session refused");
            return Ok(None);
        }
        let history = self.repo.get_history(session_id).await?;
        Ok(Some(history))
    }

    /// Delete a session; its exchanges cascade away with it.
    ///
    /// Idempotent: deleting an already-absent session is not an error.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), ChatError> {
        let deleted = self.repo.delete_session(session_id).await?;
        if deleted {
            info!(session_id = %session_id, "session deleted");
        }
        Ok(())
    }

    // --- Message exchange ---

    /// Relay a user message to the bot collaborator and persist the exchange.
    ///
    /// On the session's very first exchange the title is rewritten from the
    /// user message (once, never again). The message content is not
    /// validated; empty input passes through to the collaborator.
    ///
    /// Note: a repository failure after a successful collaborator call is
    /// not rolled back; the blast radius is this single request.
    pub async fn send_message(
        &self,
        session_id: &Uuid,
        user_message: &str,
        has_pdf: bool,
    ) -> Result<String, ChatError> {
        let bot_message = self.responder.respond(user_message, has_pdf).await?;

        let exchange = ChatExchange::new(
            *session_id,
            user_message.to_string(),
            bot_message.clone(),
        );
        self.repo.save_exchange(&exchange).await?;

        if self.repo.exchange_count(session_id).await? == 1 {
            let title = derive_title(user_message);
            self.repo.set_title(session_id, &title).await?;
            debug!(session_id = %session_id, title = %title, "session title set from first message");
        }

        Ok(bot_message)
    }

    /// Delete all exchanges for a session; the row and title stay intact.
    pub async fn clear_history(&self, session_id: &Uuid) -> Result<(), ChatError> {
        self.repo.clear_history(session_id).await?;
        info!(session_id = %session_id, "history cleared");
        Ok(())
    }

    /// All exchanges for a session in ascending timestamp order.
    pub async fn get_history(&self, session_id: &Uuid) -> Result<Vec<ChatExchange>, ChatError> {
        Ok(self.repo.get_history(session_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::DEFAULT_SESSION_TITLE;
    use parley_types::error::{RepositoryError, ResponderError};
    use std::sync::Mutex;

    /// In-memory ChatRepository for service tests.
    #[derive(Default)]
    struct MemRepo {
        sessions: Mutex<Vec<ChatSession>>,
        exchanges: Mutex<Vec<ChatExchange>>,
    }

    impl ChatRepository for MemRepo {
        async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn get_session(
            &self,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == *session_id)
                .cloned())
        }

        async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap().clone();
            sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(sessions)
        }

        async fn delete_session(&self, session_id: &Uuid) -> Result<bool, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|s| s.id != *session_id);
            self.exchanges
                .lock()
                .unwrap()
                .retain(|e| e.session_id != *session_id);
            Ok(sessions.len() < before)
        }

        async fn set_title(&self, session_id: &Uuid, title: &str) -> Result<(), RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions
                .iter_mut()
                .find(|s| s.id == *session_id)
                .ok_or(RepositoryError::NotFound)?;
            session.title = title.to_string();
            Ok(())
        }

        async fn save_exchange(&self, exchange: &ChatExchange) -> Result<(), RepositoryError> {
            self.exchanges.lock().unwrap().push(exchange.clone());
            Ok(())
        }

        async fn get_history(
            &self,
            session_id: &Uuid,
        ) -> Result<Vec<ChatExchange>, RepositoryError> {
            Ok(self
                .exchanges
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.session_id == *session_id)
                .cloned()
                .collect())
        }

        async fn exchange_count(&self, session_id: &Uuid) -> Result<u32, RepositoryError> {
            Ok(self
                .exchanges
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.session_id == *session_id)
                .count() as u32)
        }

        async fn clear_history(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
            self.exchanges
                .lock()
                .unwrap()
                .retain(|e| e.session_id != *session_id);
            Ok(())
        }
    }

    /// Responder that prefixes the user message.
    struct EchoResponder;

    impl BotResponder for EchoResponder {
        async fn respond(&self, message: &str, _has_pdf: bool) -> Result<String, ResponderError> {
            Ok(format!("echo: {message}"))
        }
    }

    /// Responder that always fails.
    struct FailingResponder;

    impl BotResponder for FailingResponder {
        async fn respond(&self, _message: &str, _has_pdf: bool) -> Result<String, ResponderError> {
            Err(ResponderError("bot unavailable".to_string()))
        }
    }

    fn service() -> ChatService<MemRepo, EchoResponder> {
        ChatService::new(MemRepo::default(), EchoResponder)
    }

    #[tokio::test]
    async fn first_message_rewrites_title_once() {
        let svc = service();
        let session = svc.create_session().await.unwrap();
        assert_eq!(session.title, DEFAULT_SESSION_TITLE);

        svc.send_message(&session.id, "what is the GDPR?", false)
            .await
            .unwrap();
        let after_first = svc.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(after_first.title, "what is the GDPR?");

        svc.send_message(&session.id, "something entirely different", false)
            .await
            .unwrap();
        let after_second = svc.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(after_second.title, "what is the GDPR?");
    }

    #[tokio::test]
    async fn long_first_message_truncated_with_ellipsis() {
        let svc = service();
        let session = svc.create_session().await.unwrap();
        let msg = "x".repeat(45);

        svc.send_message(&session.id, &msg, false).await.unwrap();

        let stored = svc.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.title, format!("{}...", "x".repeat(30)));
    }

    #[tokio::test]
    async fn send_then_history_round_trip() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        let bot = svc
            .send_message(&session.id, "hello there", false)
            .await
            .unwrap();

        let history = svc.get_history(&session.id).await.unwrap();
        let last = history.last().unwrap();
        assert_eq!(last.user_message, "hello there");
        assert_eq!(last.bot_message, bot);
    }

    #[tokio::test]
    async fn responder_failure_persists_nothing() {
        let svc = ChatService::new(MemRepo::default(), FailingResponder);
        let session = svc.create_session().await.unwrap();

        let err = svc
            .send_message(&session.id, "hi", false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "bot unavailable");

        assert!(svc.get_history(&session.id).await.unwrap().is_empty());
        let stored = svc.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.title, DEFAULT_SESSION_TITLE);
    }

    #[tokio::test]
    async fn switch_to_unknown_session_returns_none() {
        let svc = service();
        svc.create_session().await.unwrap();

        let result = svc.switch_session(&Uuid::now_v7()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn switch_returns_existing_history() {
        let svc = service();
        let session = svc.create_session().await.unwrap();
        svc.send_message(&session.id, "one", false).await.unwrap();
        svc.send_message(&session.id, "two", false).await.unwrap();

        let history = svc.switch_session(&session.id).await.unwrap().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user_message, "one");
    }

    #[tokio::test]
    async fn clear_keeps_session_and_title() {
        let svc = service();
        let session = svc.create_session().await.unwrap();
        svc.send_message(&session.id, "first message", false)
            .await
            .unwrap();

        svc.clear_history(&session.id).await.unwrap();

        assert!(svc.get_history(&session.id).await.unwrap().is_empty());
        let stored = svc.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "first message");
    }

    #[tokio::test]
    async fn delete_session_is_idempotent() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        svc.delete_session(&session.id).await.unwrap();
        svc.delete_session(&session.id).await.unwrap();

        assert!(svc.get_session(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_message_passes_through() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        let bot = svc.send_message(&session.id, "", false).await.unwrap();
        assert_eq!(bot, "echo: ");

        let stored = svc.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "");
    }
}
