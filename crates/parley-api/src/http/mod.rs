//! HTTP layer for Parley.
//!
//! Axum-based routes serving the chat UI endpoints as JSON (plus one
//! rendered HTML index view), with a signed cookie carrying the browser's
//! current session.

pub mod browser;
pub mod error;
pub mod handlers;
pub mod router;
