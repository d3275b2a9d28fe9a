//! Test harness for isolated test execution.
//!
//! The `TestHarness` struct provides a complete isolated environment for
//! testing the ingestion pipeline: a temporary storage root, an in-memory
//! catalog, and ready-made pipeline/query-surface constructors.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

use tempfile::TempDir;

use gridvault::classifier::Granularity;
use gridvault::db::{catalog_repo, Database};
use gridvault::pipeline::{NoopProgress, Pipeline, PipelineError};
use gridvault::query::QuerySurface;
use gridvault::storage::ContentStore;
use gridvault::upload::{EntryPoint, Upload};
use gridvault::IngestReceipt;

static TRACING: Once = Once::new();

/// Installs a test subscriber once per process so pipeline spans and the
/// db layer's `log::` records show up under `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_log::LogTracer::init();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Test harness providing an isolated execution environment.
pub struct TestHarness {
    temp_dir: TempDir,
    /// Base directory of the content store within temp_dir.
    pub storage_root: PathBuf,
    /// Catalog handle (in-memory unless built with `with_file_catalog`).
    pub db: Database,
}

impl TestHarness {
    /// Create a new harness with an in-memory catalog.
    pub fn new() -> Self {
        init_tracing();

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let storage_root = temp_dir.path().join("storage");
        std::fs::create_dir_all(&storage_root).expect("Failed to create storage root");

        let db = Database::open_in_memory().expect("Failed to open in-memory catalog");

        Self {
            temp_dir,
            storage_root,
            db,
        }
    }

    /// Create a harness whose catalog lives on disk inside the temp dir,
    /// for tests that exercise the file-backed open path.
    pub fn with_file_catalog() -> Self {
        init_tracing();

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let storage_root = temp_dir.path().join("storage");
        std::fs::create_dir_all(&storage_root).expect("Failed to create storage root");

        let db_path = temp_dir.path().join("catalog").join("gridvault.db");
        let db = Database::open(&db_path).expect("Failed to open file catalog");

        Self {
            temp_dir,
            storage_root,
            db,
        }
    }

    /// Get the base temp directory path.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Build a pipeline over this harness's storage root and catalog.
    pub fn create_pipeline(&self) -> Pipeline {
        Pipeline::new(ContentStore::new(&self.storage_root), self.db.clone())
    }

    /// Build a query surface over the same storage root and catalog.
    pub fn create_query_surface(&self) -> QuerySurface {
        QuerySurface::new(ContentStore::new(&self.storage_root), self.db.clone())
    }

    /// Run one upload through the pipeline via the direct surface.
    pub fn ingest(
        &self,
        filename: &str,
        body: &[u8],
    ) -> Result<IngestReceipt, PipelineError> {
        self.ingest_via(EntryPoint::DirectJson, filename, body)
    }

    /// Run one upload through the pipeline via a specific entry point.
    pub fn ingest_via(
        &self,
        entry_point: EntryPoint,
        filename: &str,
        body: &[u8],
    ) -> Result<IngestReceipt, PipelineError> {
        let pipeline = self.create_pipeline();
        pipeline.ingest(
            Upload::new(entry_point, filename, body.to_vec()),
            &NoopProgress,
        )
    }

    /// Path of a stored artifact within a named partition.
    pub fn stored_path(&self, partition: &str, filename: &str) -> PathBuf {
        self.storage_root.join(partition).join(filename)
    }

    /// Assert an artifact exists in the given partition.
    pub fn assert_stored(&self, partition: &str, filename: &str) {
        let path = self.stored_path(partition, filename);
        assert!(path.is_file(), "Expected stored artifact at {:?}", path);
    }

    /// Number of catalog rows in a granularity's record set.
    pub fn catalog_count(&self, granularity: Granularity) -> u64 {
        catalog_repo::count(&self.db, granularity).expect("Failed to count catalog rows")
    }

    /// List all stored artifacts (relative paths), recursively.
    pub fn list_stored(&self) -> Vec<PathBuf> {
        walkdir::WalkDir::new(&self.storage_root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.storage_root)
                    .ok()
                    .map(|p| p.to_path_buf())
            })
            .collect()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_storage_root() {
        let harness = TestHarness::new();
        assert!(harness.storage_root.exists());
    }

    #[test]
    fn test_harness_catalog_is_migrated() {
        let harness = TestHarness::new();
        for granularity in Granularity::ALL {
            assert_eq!(harness.catalog_count(granularity), 0);
        }
    }
}
