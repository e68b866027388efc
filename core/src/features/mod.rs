//! features/mod.rs
//! Feature extraction: entropy, size and content class of a buffer.
//!
//! Extraction never fails; every input produces a `FeatureVector`.

pub mod content_type;
pub mod entropy;

pub use content_type::*;
pub use entropy::*;

use serde::{Deserialize, Serialize};

/// Deterministic features of one file's bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Bits per byte, within `[0, 8]`.
    pub entropy: f64,
    pub size: u64,
    pub content_class: ContentClass,
    pub mime: String,
}

impl FeatureVector {
    pub fn new(entropy: f64, size: u64, content_class: ContentClass, mime: impl Into<String>) -> Self {
        Self { entropy, size, content_class, mime: mime.into() }
    }
}

pub fn extract(file_name: &str, data: &[u8]) -> FeatureVector {
    let (mime, content_class) = detect_content_type(file_name, data);
    FeatureVector {
        entropy: shannon_entropy(data),
        size: data.len() as u64,
        content_class,
        mime,
    }
}
