//! Inference gateway trait.

pub mod gateway;

pub use gateway::InferenceGateway;
