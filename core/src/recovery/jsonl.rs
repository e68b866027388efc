//! recovery/jsonl.rs
//! Append-only JSON-lines files.
//!
//! Every append is flushed before returning. Readers only consider complete
//! `\n`-terminated lines, so a record being written concurrently or cut off by
//! a crash is never parsed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{CatalogError, CatalogResult};

/// Shared appender for one JSONL file. The handle is opened lazily so a
/// `reset` (file removal) is picked up by the next append.
#[derive(Debug)]
pub struct JsonlWriter {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl JsonlWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), writer: Mutex::new(None) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append<T: Serialize>(&self, record: &T) -> CatalogResult<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut guard = self.writer.lock();
        if guard.is_none() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            *guard = Some(BufWriter::new(file));
        }
        if let Some(writer) = guard.as_mut() {
            // whole line in one write, then flush before releasing the lock
            writer.write_all(&line)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Delete the file. Returns whether a file existed.
    pub fn reset(&self) -> CatalogResult<bool> {
        let mut guard = self.writer.lock();
        *guard = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CatalogError::Persistence(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Parse every complete line of `path`. Malformed lines are skipped with a
/// warning; a missing file is an empty log.
pub fn read_records<T: DeserializeOwned>(path: &Path, tag: &str) -> CatalogResult<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(CatalogError::Persistence(format!("cannot read {}: {e}", path.display())))
        }
    };

    // drop a trailing partial line
    let complete = match bytes.iter().rposition(|&b| b == b'\n') {
        Some(last) => &bytes[..=last],
        None => &bytes[..0],
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (lineno, line) in complete.split(|&b| b == b'\n').enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<T>(line) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                skipped += 1;
                warn!("[{tag}] {}:{} skipped malformed line: {e}", path.display(), lineno + 1);
            }
        }
    }
    if skipped > 0 {
        warn!("[{tag}] {} malformed line(s) skipped in {}", skipped, path.display());
    }
    Ok(records)
}
