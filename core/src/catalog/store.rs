//! catalog/store.rs
//! SQLite-backed metadata catalog.
//!
//! One writer connection serializes inserts and updates, so ids are handed
//! out in commit order. A second connection serves reads; with WAL enabled it
//! only ever observes committed rows and never blocks on the writer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Params};

use crate::catalog::entry::{CatalogEntry, NewEntry, UndecodableRow};
use crate::catalog::filter::QueryFilter;
use crate::catalog::schema;
use crate::catalog::stats::{self, CatalogStats};
use crate::compression::Algorithm;
use crate::constants::DEFAULT_MIME;
use crate::features::{ContentClass, FeatureVector};
use crate::selector::Decision;
use crate::types::{CatalogError, CatalogResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Rows of a listing scan; undecodable ones are kept for the caller to report.
pub type ScannedRow = Result<CatalogEntry, UndecodableRow>;

const DECISION_COLUMNS: &str =
    "file_name, algo, entropy, size, entropy_threshold, size_threshold, timestamp, mime_type, content_class, forced";

#[derive(Debug)]
pub struct MetadataCatalog {
    path: PathBuf,
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

fn configure(conn: &Connection) -> CatalogResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        warn!("[CATALOG] journal_mode is {mode}, readers may block on the writer");
    }
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

impl MetadataCatalog {
    /// Open or create the catalog at `path` and migrate it forward.
    /// Opening an up-to-date catalog twice is a no-op.
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = Connection::open(&path)?;
        configure(&writer)?;
        let version = schema::migrate(&mut writer)?;

        let reader = Connection::open(&path)?;
        reader.busy_timeout(BUSY_TIMEOUT)?;

        info!("[CATALOG] opened {} (schema v{version})", path.display());
        Ok(Self {
            path,
            writer: Mutex::new(writer),
            reader: Mutex::new(reader),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert one row in a single statement and return its id.
    pub fn record(&self, entry: &NewEntry) -> CatalogResult<i64> {
        entry.validate()?;
        let conn = self.writer.lock();
        conn.execute(
            "INSERT INTO files (file_name, file_hash, mime_type, content_class, algo, original_size,
                                compressed_size, compression_ratio, entropy, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.file_name,
                entry.content_hash,
                entry.mime,
                entry.content_class.as_str(),
                entry.algorithm.name(),
                entry.original_size as i64,
                entry.compressed_size as i64,
                entry.compression_ratio,
                entry.entropy,
                entry.created_at,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!("[CATALOG] recorded id={id} {} ({})", entry.file_name, entry.algorithm);
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> CatalogResult<Option<CatalogEntry>> {
        let conn = self.reader.lock();
        let sql = format!("SELECT {} FROM files WHERE id = ?1", CatalogEntry::COLUMNS);
        Ok(conn.query_row(&sql, [id], CatalogEntry::from_row).optional()?)
    }

    /// Most recent row stored under `file_name`.
    pub fn latest_by_name(&self, file_name: &str) -> CatalogResult<Option<CatalogEntry>> {
        let conn = self.reader.lock();
        let sql = format!(
            "SELECT {} FROM files WHERE file_name = ?1 ORDER BY id DESC LIMIT 1",
            CatalogEntry::COLUMNS
        );
        Ok(conn.query_row(&sql, [file_name], CatalogEntry::from_row).optional()?)
    }

    /// Numeric id first, then exact file name (latest version). Only the id
    /// parse ignores surrounding whitespace.
    pub fn lookup(&self, id_or_name: &str) -> CatalogResult<CatalogEntry> {
        if let Ok(id) = id_or_name.trim().parse::<i64>() {
            if let Some(entry) = self.get_by_id(id)? {
                return Ok(entry);
            }
        }
        self.latest_by_name(id_or_name)?
            .ok_or_else(|| CatalogError::NotFound { key: id_or_name.to_string() })
    }

    fn scan<P: Params>(&self, sql: &str, params: P) -> CatalogResult<Vec<ScannedRow>> {
        let conn = self.reader.lock();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, CatalogEntry::decode_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Matching rows in insertion order, undecodable rows included.
    pub fn scan_query(&self, filter: &QueryFilter) -> CatalogResult<Vec<ScannedRow>> {
        let (where_clause, values) = filter.to_sql();
        let sql = format!("SELECT {} FROM files{where_clause} ORDER BY id", CatalogEntry::COLUMNS);
        self.scan(&sql, params_from_iter(values))
    }

    /// Rows awaiting entropy backfill in insertion order, undecodable rows included.
    pub fn scan_missing_entropy(&self) -> CatalogResult<Vec<ScannedRow>> {
        let sql = format!("SELECT {} FROM files WHERE entropy IS NULL ORDER BY id", CatalogEntry::COLUMNS);
        self.scan(&sql, [])
    }

    /// Matching rows in insertion order. Rows naming an algorithm this build
    /// does not know are skipped with a warning.
    pub fn query(&self, filter: &QueryFilter) -> CatalogResult<Vec<CatalogEntry>> {
        Ok(decoded_only(self.scan_query(filter)?))
    }

    /// The most recent `window` rows, oldest first.
    pub fn recent_entries(&self, window: usize) -> CatalogResult<Vec<CatalogEntry>> {
        let sql = format!(
            "SELECT {} FROM files ORDER BY id DESC LIMIT ?1",
            CatalogEntry::COLUMNS
        );
        let mut entries = decoded_only(self.scan(&sql, [window as i64])?);
        entries.reverse();
        Ok(entries)
    }

    pub fn entries_missing_entropy(&self) -> CatalogResult<Vec<CatalogEntry>> {
        Ok(decoded_only(self.scan_missing_entropy()?))
    }

    /// Only the entropy column of an existing row is ever updated.
    pub fn update_entropy(&self, id: i64, entropy: f64) -> CatalogResult<()> {
        let changed = self
            .writer
            .lock()
            .execute("UPDATE files SET entropy = ?1 WHERE id = ?2", params![entropy, id])?;
        if changed == 0 {
            return Err(CatalogError::NotFound { key: id.to_string() });
        }
        Ok(())
    }

    pub fn count(&self) -> CatalogResult<u64> {
        let n: i64 = self.reader.lock().query_row("SELECT COUNT(*) FROM files", [], |r| r.get(0))?;
        Ok(n.max(0) as u64)
    }

    pub fn stats(&self) -> CatalogResult<CatalogStats> {
        stats::compute(&self.reader.lock())
    }

    /// Append a decision, whatever the outcome of the store that follows.
    pub fn record_decision(&self, decision: &Decision) -> CatalogResult<i64> {
        let conn = self.writer.lock();
        conn.execute(
            &format!(
                "INSERT INTO decisions ({DECISION_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            params![
                decision.file_name,
                decision.algorithm.name(),
                decision.features.entropy,
                decision.features.size as i64,
                decision.entropy_threshold_used,
                decision.size_threshold_used as i64,
                decision.timestamp,
                decision.features.mime,
                decision.features.content_class.as_str(),
                decision.forced,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// The most recent `window` decisions, oldest first. Rows naming an
    /// algorithm this build does not know are skipped with a warning.
    pub fn decisions(&self, window: usize) -> CatalogResult<Vec<Decision>> {
        let conn = self.reader.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {DECISION_COLUMNS} FROM decisions ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map([window as i64], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                row.get::<_, Option<i64>>(3)?.unwrap_or(0).max(0) as u64,
                row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                row.get::<_, Option<i64>>(5)?.unwrap_or(0).max(0) as u64,
                row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
                row.get::<_, Option<String>>(7)?,
                row.get::<_, Option<String>>(8)?,
                row.get::<_, Option<bool>>(9)?.unwrap_or(false),
            ))
        })?;

        let mut decisions = Vec::new();
        for row in rows {
            let (file_name, algo, entropy, size, e_thr, s_thr, timestamp, mime, class, forced) = row?;
            let algorithm = match algo.parse::<Algorithm>() {
                Ok(a) => a,
                Err(e) => {
                    warn!("[CATALOG] skipping decision for {file_name}: {e}");
                    continue;
                }
            };
            let mime = mime.unwrap_or_else(|| DEFAULT_MIME.to_string());
            let content_class = class
                .and_then(|c| c.parse().ok())
                .unwrap_or_else(|| ContentClass::from_mime(&mime));
            decisions.push(Decision {
                file_name,
                algorithm,
                entropy_threshold_used: e_thr,
                size_threshold_used: s_thr,
                features: FeatureVector::new(entropy, size, content_class, mime),
                timestamp,
                forced,
            });
        }
        decisions.reverse();
        Ok(decisions)
    }

    pub fn decision_count(&self) -> CatalogResult<u64> {
        let n: i64 = self.reader.lock().query_row("SELECT COUNT(*) FROM decisions", [], |r| r.get(0))?;
        Ok(n.max(0) as u64)
    }
}

fn decoded_only(rows: Vec<ScannedRow>) -> Vec<CatalogEntry> {
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(entry) => Some(entry),
            Err(bad) => {
                warn!("[CATALOG] skipping id={} {}: unknown algorithm {:?}", bad.id, bad.file_name, bad.algo);
                None
            }
        })
        .collect()
}
