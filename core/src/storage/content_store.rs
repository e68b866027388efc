//! storage/content_store.rs
//! Compressed blobs on the local filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::compression::Algorithm;
use crate::storage::key::StorageKey;
use crate::storage::atomic_write;
use crate::types::{CatalogError, CatalogResult};

/// Owns the blob directory. Writes for different keys are independent;
/// same-key writers race to an atomic rename and the last one wins.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create the root directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> CatalogResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CatalogError::Persistence(format!("cannot create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        key.path_under(&self.root)
    }

    pub fn put(&self, file_name: &str, algorithm: Algorithm, compressed: &[u8]) -> CatalogResult<StorageKey> {
        let key = StorageKey::new(file_name, algorithm)?;
        let path = self.path_for(&key);
        atomic_write(&path, compressed)?;
        debug!("[STORE] wrote {} ({} bytes)", path.display(), compressed.len());
        Ok(key)
    }

    pub fn get(&self, key: &StorageKey) -> CatalogResult<Vec<u8>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CatalogError::BlobNotFound { path }),
            Err(e) => Err(CatalogError::Persistence(format!("cannot read {}: {e}", path.display()))),
        }
    }

    pub fn contains(&self, key: &StorageKey) -> bool {
        self.path_for(key).is_file()
    }
}
