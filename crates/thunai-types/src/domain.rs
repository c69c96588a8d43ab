//! Subject-domain metadata.

use serde::{Deserialize, Serialize};

/// Display metadata and candidate models for one subject domain.
///
/// The model list is ordered and non-empty; a model may legitimately appear
/// in more than one domain's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Stable lookup key (e.g. "healthcare").
    pub key: String,
    /// Human-readable display name.
    pub name: String,
    /// Icon glyph shown next to the name.
    pub icon: String,
    /// Free-text description of what the domain covers.
    pub description: String,
    /// Ordered candidate model identifiers.
    pub models: Vec<String>,
}
