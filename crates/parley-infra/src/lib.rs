//! Infrastructure layer for Parley.
//!
//! Contains implementations of the traits defined in `parley-core`:
//! SQLite storage, local filesystem adapters, and HTTP clients for the
//! bot-response and PDF-ingest collaborators.

pub mod collab;
pub mod config;
pub mod filesystem;
pub mod sqlite;
