//! Business logic for Thunai.
//!
//! Services here are generic over the repository, gateway, and blob-store
//! traits they need; the concrete implementations live in `thunai-infra`.
//! This crate never depends on SQLite, HTTP, or the inference backend
//! directly.

pub mod chat;
pub mod contact;
pub mod domain;
pub mod llm;
pub mod upload;
pub mod user;
