//! REST API request handlers.

pub mod chat;
pub mod contact;
pub mod conversation;
pub mod domain;
pub mod upload;
pub mod user;
