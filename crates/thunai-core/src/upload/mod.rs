//! File uploads: validation, naming, blob storage, metadata persistence.

pub mod blob;
pub mod filename;
pub mod repository;
pub mod service;

pub use blob::BlobStore;
pub use repository::UploadRepository;
pub use service::UploadService;
