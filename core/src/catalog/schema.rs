//! catalog/schema.rs
//! Versioned forward migrations for the catalog database.
//!
//! - Version 0: empty file, or a catalog written before versioning.
//! - Migrations run in order inside one transaction each; a failure rolls
//!   that step back and leaves `user_version` at the last good version.
//! - Every step is safe to re-run and never drops data.

use log::{error, info};
use rusqlite::{Connection, Transaction};

use crate::features::ContentClass;
use crate::types::{CatalogError, CatalogResult};

pub const SCHEMA_VERSION: u32 = 2;

type MigrationFn = fn(&Transaction<'_>) -> rusqlite::Result<()>;

const MIGRATIONS: &[(u32, &str, MigrationFn)] = &[
    (1, "files and decisions tables", migration_v1),
    (2, "content class columns, decision mime/forced, indexes", migration_v2),
];

pub fn schema_version(conn: &Connection) -> CatalogResult<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Bring the database up to `SCHEMA_VERSION`. Returns the final version.
pub fn migrate(conn: &mut Connection) -> CatalogResult<u32> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(CatalogError::Persistence(format!(
            "catalog schema v{current} is newer than supported v{SCHEMA_VERSION}"
        )));
    }
    if current == SCHEMA_VERSION {
        return Ok(current);
    }

    info!("[CATALOG] migrating schema v{current} -> v{SCHEMA_VERSION}");
    for (version, description, migration) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        let tx = conn.transaction()?;
        migration(&tx).map_err(|e| {
            error!("[CATALOG] migration v{version} ({description}) failed: {e}");
            CatalogError::Persistence(format!("migration to v{version} failed: {e}"))
        })?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!("[CATALOG] applied v{version}: {description}");
    }
    schema_version(conn)
}

fn migration_v1(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    // Column names match catalogs created before versioning.
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT,
            file_hash TEXT,
            mime_type TEXT,
            algo TEXT,
            original_size INTEGER,
            compressed_size INTEGER,
            compression_ratio REAL,
            entropy REAL,
            created_at REAL
        );
        CREATE TABLE IF NOT EXISTS decisions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT,
            algo TEXT,
            entropy REAL,
            size INTEGER,
            entropy_threshold REAL,
            size_threshold INTEGER,
            timestamp REAL
        );",
    )
}

fn has_column(tx: &Transaction<'_>, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = tx.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn add_column(tx: &Transaction<'_>, table: &str, column: &str, decl: &str) -> rusqlite::Result<()> {
    if !has_column(tx, table, column)? {
        tx.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl}"))?;
    }
    Ok(())
}

fn migration_v2(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    add_column(tx, "files", "content_class", "TEXT")?;
    add_column(tx, "decisions", "mime_type", "TEXT")?;
    add_column(tx, "decisions", "content_class", "TEXT")?;
    add_column(tx, "decisions", "forced", "INTEGER NOT NULL DEFAULT 0")?;

    // Older rows only carry a MIME type
    let mut rows = Vec::new();
    {
        let mut stmt = tx.prepare("SELECT id, mime_type FROM files WHERE content_class IS NULL")?;
        let mapped = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
        for row in mapped {
            rows.push(row?);
        }
    }
    for (id, mime) in rows {
        let class = ContentClass::from_mime(mime.as_deref().unwrap_or_default());
        tx.execute(
            "UPDATE files SET content_class = ?1 WHERE id = ?2",
            rusqlite::params![class.as_str(), id],
        )?;
    }

    tx.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_files_name ON files(file_name);
         CREATE INDEX IF NOT EXISTS idx_files_algo ON files(algo);",
    )
}
