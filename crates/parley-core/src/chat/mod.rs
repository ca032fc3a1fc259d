//! Chat session lifecycle and message exchange.

pub mod repository;
pub mod service;
