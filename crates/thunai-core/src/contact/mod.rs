//! Contact form submissions.

pub mod repository;
pub mod service;

pub use repository::ContactRepository;
pub use service::ContactService;
