//! PDF upload storage and collaborator hand-off.

pub mod service;
