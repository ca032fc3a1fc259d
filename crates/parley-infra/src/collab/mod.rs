//! HTTP clients for the external collaborators.
//!
//! The bot-response and PDF-processing functions are opaque services; these
//! clients only carry JSON across the seam defined in `parley-core::collab`.

pub mod bot;
pub mod pdf;

pub use bot::HttpBotResponder;
pub use pdf::HttpPdfIngestor;
