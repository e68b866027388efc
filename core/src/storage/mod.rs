//! storage/mod.rs
//! Content-addressed blob storage and the atomic file write it relies on.

pub mod content_store;
pub mod key;

pub use content_store::*;
pub use key::*;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::types::{CatalogError, CatalogResult};

/// Write `bytes` to a temp file beside `path`, sync it, then rename it over
/// `path`. Readers observe either the old file or the complete new one.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> CatalogResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let persist_err = |e: std::io::Error| {
        CatalogError::Persistence(format!("atomic write to {} failed: {e}", path.display()))
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(persist_err)?;
    tmp.write_all(bytes).map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        atomic_write(&path, b"first version, longer").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        // no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
