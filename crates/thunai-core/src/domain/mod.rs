//! Subject-domain registry.

pub mod registry;

pub use registry::DomainRegistry;
