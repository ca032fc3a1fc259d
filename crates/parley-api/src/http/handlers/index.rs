//! The rendered index view.
//!
//! GET / lists all sessions and the browser's current session id. This is
//! the only HTML endpoint; everything else speaks JSON.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Response};
use uuid::Uuid;

use parley_types::chat::ChatSession;

use crate::http::browser::BrowserSession;
use crate::http::error::AppError;
use crate::http::handlers::ensure_session;
use crate::state::AppState;

/// GET / - Render the session list, ensuring the browser has a session.
pub async fn index(
    State(state): State<AppState>,
    BrowserSession(current): BrowserSession,
) -> Result<Response, AppError> {
    let (current, cookie) = ensure_session(&state, current).await?;
    let sessions = state.chat_service.list_sessions().await?;
    let page = Html(render_index(&sessions, &current));

    Ok(match cookie {
        Some(cookie) => (AppendHeaders([(SET_COOKIE, cookie)]), page).into_response(),
        None => page.into_response(),
    })
}

fn render_index(sessions: &[ChatSession], current: &Uuid) -> String {
    let mut items = String::new();
    for session in sessions {
        let marker = if session.id == *current { " (current)" } else { "" };
        items.push_str(&format!(
            "      <li data-session-id=\"{}\">{}{}</li>\n",
            session.id,
            escape_html(&session.title),
            marker,
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Parley</title></head>\n\
         <body>\n\
           <h1>Parley</h1>\n\
           <p>Current session: <code id=\"current-session\">{current}</code></p>\n\
           <ul id=\"sessions\">\n{items}  </ul>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_titles() {
        let mut session = ChatSession::new();
        session.title = "<script>alert(1)</script>".to_string();
        let html = render_index(std::slice::from_ref(&session), &session.id);

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn marks_current_session() {
        let a = ChatSession::new();
        let b = ChatSession::new();
        let html = render_index(&[a.clone(), b], &a.id);
        assert!(html.contains(&format!("{}", a.id)));
        assert!(html.contains("(current)"));
    }
}
