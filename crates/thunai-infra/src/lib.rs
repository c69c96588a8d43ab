//! Infrastructure adapters for Thunai.
//!
//! Concrete implementations of the repository, gateway, and blob-store
//! traits defined in `thunai-core`: SQLite persistence, filesystem blob
//! storage, the Ollama inference gateway, and config file loading.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod storage;
