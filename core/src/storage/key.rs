//! storage/key.rs

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compression::Algorithm;
use crate::types::{CatalogError, CatalogResult};

/// Address of one blob: `{root}/{file_name}.{algorithm}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey {
    pub file_name: String,
    pub algorithm: Algorithm,
}

impl StorageKey {
    /// Rejects names that are empty, contain a path separator or NUL, or are
    /// `.`/`..` and would therefore resolve outside the storage root.
    pub fn new(file_name: impl Into<String>, algorithm: Algorithm) -> CatalogResult<Self> {
        let file_name = file_name.into();
        validate_file_name(&file_name)?;
        Ok(Self { file_name, algorithm })
    }

    /// `file_name.algorithm`
    pub fn blob_name(&self) -> String {
        format!("{}.{}", self.file_name, self.algorithm.name())
    }

    pub fn path_under(&self, root: &Path) -> PathBuf {
        root.join(self.blob_name())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.blob_name())
    }
}

pub fn validate_file_name(file_name: &str) -> CatalogResult<()> {
    let bad = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(&['/', '\\', '\0'][..]);
    if bad {
        return Err(CatalogError::Persistence(format!(
            "file name {file_name:?} is not a plain base name"
        )));
    }
    Ok(())
}
