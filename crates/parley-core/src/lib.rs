//! Business logic and trait definitions for Parley.
//!
//! This crate defines the "ports" (repository, filesystem, and collaborator
//! traits) that the infrastructure layer implements. It depends only on
//! `parley-types` -- never on `parley-infra` or any database/IO crate.

pub mod chat;
pub mod collab;
pub mod fs;
pub mod upload;
