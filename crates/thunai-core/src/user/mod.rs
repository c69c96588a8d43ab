//! User accounts and access tokens.

pub mod repository;
pub mod service;
pub mod token;

pub use repository::{TokenRepository, UserRepository};
pub use service::UserService;
