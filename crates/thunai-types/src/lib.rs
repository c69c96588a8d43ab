//! Shared domain types for Thunai.
//!
//! This crate holds the data shapes passed between the core services, the
//! infra implementations, and the HTTP layer: users, conversations and
//! messages, uploads, contact submissions, domain metadata, configuration,
//! and the error enums. It has no knowledge of SQLite, HTTP, or the
//! inference backend.

pub mod chat;
pub mod config;
pub mod contact;
pub mod domain;
pub mod error;
pub mod llm;
pub mod upload;
pub mod user;
