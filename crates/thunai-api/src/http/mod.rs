//! REST API surface: router, handlers, extractors, response envelope.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
