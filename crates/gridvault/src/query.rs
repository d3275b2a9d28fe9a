//! Read-side operations over the catalog and the content store.
//!
//! Queries never mutate either store. The catalog and the content store
//! are consulted independently: `latest` is catalog-only, `read_artifact`
//! is store-only.

use serde_json::Value;
use thiserror::Error;

use crate::classifier::{infer_granularity, Granularity};
use crate::db::{catalog_repo, CatalogEntry, Database, DatabaseError};
use crate::error::StorageError;
use crate::storage::ContentStore;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The supplied granularity token is not one of hourly/daily/weekly.
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    /// No known granularity token occurs in the filename.
    #[error("No granularity could be inferred from filename: {0}")]
    GranularityNotInferred(String),

    /// The granularity is valid but its record set is empty.
    #[error("No catalog entries for granularity: {0}")]
    NoEntries(Granularity),

    /// No partition holds an artifact with this name.
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    /// Stored bytes are not a structured record or record list.
    #[error("Failed to parse artifact '{filename}': {reason}")]
    Parse { filename: String, reason: String },

    #[error("Catalog query failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Storage read failed: {0}")]
    Storage(StorageError),
}

pub struct QuerySurface {
    store: ContentStore,
    db: Database,
}

impl QuerySurface {
    pub fn new(store: ContentStore, db: Database) -> Self {
        Self { store, db }
    }

    /// Latest catalog entry for a granularity supplied as an untrusted
    /// string. An unknown token (`InvalidGranularity`) and a valid but
    /// empty record set (`NoEntries`) are distinct failures.
    pub fn latest(&self, granularity: &str) -> Result<CatalogEntry, QueryError> {
        let granularity = Granularity::parse(granularity)
            .ok_or_else(|| QueryError::InvalidGranularity(granularity.to_string()))?;
        catalog_repo::latest(&self.db, granularity)?.ok_or(QueryError::NoEntries(granularity))
    }

    /// Reads an artifact's bytes via the fixed partition search order and
    /// parses them as a JSON record or record list. A parse failure is
    /// reported distinctly from a missing artifact. Catalog-independent:
    /// uncataloged artifacts in the fallback partition are readable too.
    pub fn read_artifact(&self, filename: &str) -> Result<Value, QueryError> {
        let bytes = self.store.read(filename).map_err(|e| match e {
            StorageError::NotFound(name) => QueryError::ArtifactNotFound(name),
            other => QueryError::Storage(other),
        })?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| QueryError::Parse {
            filename: filename.to_string(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(_) | Value::Array(_) => Ok(value),
            _ => Err(QueryError::Parse {
                filename: filename.to_string(),
                reason: "expected a record or record list".to_string(),
            }),
        }
    }

    /// Convenience lookup: infer granularity from substring presence in
    /// `filename` (deliberately looser than the ingest grammar, never used
    /// for write routing) and return the latest entry for it.
    pub fn latest_by_inferred_pattern(&self, filename: &str) -> Result<CatalogEntry, QueryError> {
        let granularity = infer_granularity(filename)
            .ok_or_else(|| QueryError::GranularityNotInferred(filename.to_string()))?;
        catalog_repo::latest(&self.db, granularity)?.ok_or(QueryError::NoEntries(granularity))
    }
}
