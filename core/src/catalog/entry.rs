//! catalog/entry.rs
//! Row types of the `files` table.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::compression::Algorithm;
use crate::constants::DEFAULT_MIME;
use crate::features::{ContentClass, FeatureVector};
use crate::storage::StorageKey;
use crate::types::{CatalogError, CatalogResult};
use crate::utils::{compression_ratio, unix_timestamp};

/// One stored file version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub file_name: String,
    /// sha-256 hex of the original bytes.
    pub content_hash: String,
    pub mime: String,
    pub content_class: ContentClass,
    pub algorithm: Algorithm,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: f64,
    /// `None` only for rows written before entropy was recorded.
    pub entropy: Option<f64>,
    pub created_at: f64,
}

impl CatalogEntry {
    pub fn storage_key(&self) -> CatalogResult<StorageKey> {
        StorageKey::new(self.file_name.clone(), self.algorithm)
    }

    pub(crate) const COLUMNS: &'static str = "id, file_name, file_hash, mime_type, content_class, algo, \
         original_size, compressed_size, compression_ratio, entropy, created_at";

    /// Map a row selected with [`Self::COLUMNS`]. An unknown algorithm is a
    /// conversion failure carrying the `CompressionError`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
        Self::decode_row(row)?.map_err(|bad| {
            let e = crate::compression::CompressionError::UnknownAlgorithm { name: bad.algo };
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })
    }

    /// Like [`Self::from_row`], but a row whose `algo` does not resolve comes
    /// back as an [`UndecodableRow`] instead of failing the whole scan.
    pub(crate) fn decode_row(row: &Row<'_>) -> rusqlite::Result<Result<CatalogEntry, UndecodableRow>> {
        let id: i64 = row.get(0)?;
        let file_name: String = row.get(1)?;
        let algo = row.get::<_, Option<String>>(5)?.unwrap_or_default();
        let algorithm = match algo.parse::<Algorithm>() {
            Ok(a) => a,
            Err(_) => return Ok(Err(UndecodableRow { id, file_name, algo })),
        };
        let mime: Option<String> = row.get(3)?;
        let mime = mime.unwrap_or_else(|| DEFAULT_MIME.to_string());
        let content_class = match row.get::<_, Option<String>>(4)? {
            Some(s) => s.parse().unwrap_or_else(|_| ContentClass::from_mime(&mime)),
            None => ContentClass::from_mime(&mime),
        };
        Ok(Ok(CatalogEntry {
            id,
            file_name,
            content_hash: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            mime,
            content_class,
            algorithm,
            original_size: row.get::<_, Option<i64>>(6)?.unwrap_or(0).max(0) as u64,
            compressed_size: row.get::<_, Option<i64>>(7)?.unwrap_or(0).max(0) as u64,
            compression_ratio: row.get::<_, Option<f64>>(8)?.unwrap_or(1.0),
            entropy: row.get(9)?,
            created_at: row.get::<_, Option<f64>>(10)?.unwrap_or(0.0),
        }))
    }
}

/// A `files` row whose algorithm this build cannot resolve (unknown name or NULL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndecodableRow {
    pub id: i64,
    pub file_name: String,
    pub algo: String,
}

impl UndecodableRow {
    pub fn error(&self) -> CatalogError {
        CatalogError::UnknownAlgorithm(self.algo.clone())
    }
}

/// Everything needed to insert a row; the catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub file_name: String,
    pub content_hash: String,
    pub mime: String,
    pub content_class: ContentClass,
    pub algorithm: Algorithm,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: f64,
    pub entropy: Option<f64>,
    pub created_at: f64,
}

impl NewEntry {
    /// Entry for bytes just compressed under `algorithm`. The ratio is
    /// derived from the two sizes so the row is always self-consistent.
    pub fn from_store(
        file_name: impl Into<String>,
        content_hash: impl Into<String>,
        features: &FeatureVector,
        algorithm: Algorithm,
        compressed_size: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_hash: content_hash.into(),
            mime: features.mime.clone(),
            content_class: features.content_class,
            algorithm,
            original_size: features.size,
            compressed_size,
            compression_ratio: compression_ratio(features.size, compressed_size),
            entropy: Some(features.entropy),
            created_at: unix_timestamp(),
        }
    }

    pub(crate) fn validate(&self) -> CatalogResult<()> {
        if self.file_name.is_empty() {
            return Err(CatalogError::Persistence("entry has an empty file name".into()));
        }
        if !self.compression_ratio.is_finite() {
            return Err(CatalogError::Persistence(format!(
                "entry {} has a non-finite compression ratio",
                self.file_name
            )));
        }
        Ok(())
    }

    pub(crate) fn into_entry(self, id: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            file_name: self.file_name,
            content_hash: self.content_hash,
            mime: self.mime,
            content_class: self.content_class,
            algorithm: self.algorithm,
            original_size: self.original_size,
            compressed_size: self.compressed_size,
            compression_ratio: self.compression_ratio,
            entropy: self.entropy,
            created_at: self.created_at,
        }
    }
}
