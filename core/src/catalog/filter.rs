//! catalog/filter.rs
//! Composable predicates for `MetadataCatalog::query`.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::catalog::entry::CatalogEntry;
use crate::compression::Algorithm;
use crate::features::ContentClass;

/// All set predicates must hold. The default filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub algorithm: Option<Algorithm>,
    pub content_class: Option<ContentClass>,
    pub mime: Option<String>,
    /// Strictly below.
    pub entropy_below: Option<f64>,
    /// Strictly below.
    pub ratio_below: Option<f64>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn content_class(mut self, class: ContentClass) -> Self {
        self.content_class = Some(class);
        self
    }

    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn entropy_below(mut self, limit: f64) -> Self {
        self.entropy_below = Some(limit);
        self
    }

    pub fn ratio_below(mut self, limit: f64) -> Self {
        self.ratio_below = Some(limit);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// In-memory evaluation, equivalent to the SQL `WHERE` clause.
    /// Rows with no entropy never satisfy `entropy_below`.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.algorithm.map_or(true, |a| entry.algorithm == a)
            && self.content_class.map_or(true, |c| entry.content_class == c)
            && self.mime.as_deref().map_or(true, |m| entry.mime == m)
            && self
                .entropy_below
                .map_or(true, |lim| entry.entropy.is_some_and(|e| e < lim))
            && self.ratio_below.map_or(true, |lim| entry.compression_ratio < lim)
    }

    /// `WHERE` clause (empty when no predicate is set) and its parameters.
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        if let Some(a) = self.algorithm {
            clauses.push("algo = ?");
            params.push(Value::Text(a.name().to_string()));
        }
        if let Some(c) = self.content_class {
            clauses.push("content_class = ?");
            params.push(Value::Text(c.as_str().to_string()));
        }
        if let Some(m) = &self.mime {
            clauses.push("mime_type = ?");
            params.push(Value::Text(m.clone()));
        }
        if let Some(lim) = self.entropy_below {
            clauses.push("entropy < ?");
            params.push(Value::Real(lim));
        }
        if let Some(lim) = self.ratio_below {
            clauses.push("compression_ratio < ?");
            params.push(Value::Real(lim));
        }
        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (sql, params) = QueryFilter::new().to_sql();
        assert!(sql.is_empty());
        assert!(params.is_empty());
        assert!(QueryFilter::new().is_empty());
    }

    #[test]
    fn predicates_are_joined_with_and() {
        let (sql, params) = QueryFilter::new().algorithm(Algorithm::Zstd).ratio_below(0.5).to_sql();
        assert_eq!(sql, " WHERE algo = ? AND compression_ratio < ?");
        assert_eq!(params.len(), 2);
    }
}
