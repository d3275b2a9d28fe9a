use thiserror::Error;

use crate::classifier::Granularity;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The upload failed a hard precondition. Nothing was written and
    /// nothing was cataloged.
    #[error("Upload rejected: {reason}")]
    Rejected { reason: String },

    /// The content store could not persist the bytes. The operation
    /// aborted; nothing was cataloged.
    #[error("Storage failed: {0}")]
    Storage(#[from] crate::error::StorageError),
}

/// Non-fatal conditions surfaced on an otherwise successful ingest.
#[derive(Debug, Clone)]
pub enum IngestWarning {
    /// The artifact was stored but the catalog append failed. The store
    /// write is durable; only the catalog append needs retrying.
    CatalogAppendFailed {
        granularity: Granularity,
        error: String,
    },
}
