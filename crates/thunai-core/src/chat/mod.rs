//! Conversation lifecycle: repository trait, service, title derivation.

pub mod repository;
pub mod service;
pub mod title;

pub use repository::ConversationRepository;
pub use service::ChatService;
