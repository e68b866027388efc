//! catalog/stats.rs
//! Aggregate statistics over the `files` table.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::types::CatalogResult;

/// Per-algorithm aggregates. Entropy figures ignore rows without entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmStats {
    /// As stored in the catalog.
    pub algorithm: String,
    pub files: u64,
    pub entropy_avg: Option<f64>,
    pub entropy_min: Option<f64>,
    pub entropy_max: Option<f64>,
    pub ratio_avg: Option<f64>,
    /// Lowest ratio.
    pub ratio_best: Option<f64>,
    /// Highest ratio.
    pub ratio_worst: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_rows: u64,
    pub missing_entropy: u64,
    pub entropy_avg: Option<f64>,
    pub entropy_min: Option<f64>,
    pub entropy_max: Option<f64>,
    /// Ordered by algorithm name.
    pub per_algorithm: Vec<AlgorithmStats>,
}

impl CatalogStats {
    pub fn algorithm(&self, name: &str) -> Option<&AlgorithmStats> {
        self.per_algorithm.iter().find(|s| s.algorithm == name)
    }
}

pub(crate) fn compute(conn: &Connection) -> CatalogResult<CatalogStats> {
    let (total_rows, missing_entropy, entropy_avg, entropy_min, entropy_max) = conn.query_row(
        "SELECT COUNT(*), COUNT(*) - COUNT(entropy), AVG(entropy), MIN(entropy), MAX(entropy) FROM files",
        [],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
            ))
        },
    )?;

    let mut stmt = conn.prepare(
        "SELECT COALESCE(algo, ''), COUNT(*), AVG(entropy), MIN(entropy), MAX(entropy),
                AVG(compression_ratio), MIN(compression_ratio), MAX(compression_ratio)
         FROM files GROUP BY algo ORDER BY algo",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(AlgorithmStats {
            algorithm: row.get(0)?,
            files: row.get::<_, i64>(1)?.max(0) as u64,
            entropy_avg: row.get(2)?,
            entropy_min: row.get(3)?,
            entropy_max: row.get(4)?,
            ratio_avg: row.get(5)?,
            ratio_best: row.get(6)?,
            ratio_worst: row.get(7)?,
        })
    })?;
    let per_algorithm = rows.collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(CatalogStats {
        total_rows: total_rows.max(0) as u64,
        missing_entropy: missing_entropy.max(0) as u64,
        entropy_avg,
        entropy_min,
        entropy_max,
        per_algorithm,
    })
}
