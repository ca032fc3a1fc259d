//! HTTP client for the bot-response collaborator.
//!
//! POST `{base_url}/respond` with `{"message": ..., "has_pdf": ...}`,
//! expecting `{"text": ...}`. Any transport or non-2xx failure surfaces as a
//! [`ResponderError`] whose message reaches the client verbatim.

use parley_core::collab::BotResponder;
use parley_types::error::ResponderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Reqwest-backed implementation of [`BotResponder`].
pub struct HttpBotResponder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct RespondRequest<'a> {
    message: &'a str,
    has_pdf: bool,
}

#[derive(Deserialize)]
struct RespondResponse {
    text: String,
}

impl HttpBotResponder {
    /// Create a new responder client against `base_url`.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self { client, base_url }
    }

    fn url(&self) -> String {
        format!("{}/respond", self.base_url.trim_end_matches('/'))
    }
}

impl BotResponder for HttpBotResponder {
    async fn respond(&self, message: &str, has_pdf: bool) -> Result<String, ResponderError> {
        debug!(has_pdf, "relaying message to bot collaborator");

        let response = self
            .client
            .post(self.url())
            .json(&RespondRequest { message, has_pdf })
            .send()
            .await
            .map_err(|e| ResponderError(format!("bot request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ResponderError(if error_body.is_empty() {
                format!("bot returned HTTP {status}")
            } else {
                error_body
            }));
        }

        let body: RespondResponse = response
            .json()
            .await
            .map_err(|e| ResponderError(format!("invalid bot response: {e}")))?;

        Ok(body.text)
    }
}
