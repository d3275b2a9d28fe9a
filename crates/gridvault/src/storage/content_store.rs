use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classifier::{Classification, Granularity};
use crate::error::StorageError;

/// A named subdivision of the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Granular(Granularity),
    /// Fixed fallback for artifacts no grammar recognized.
    Others,
}

impl Partition {
    /// Fixed search order for read-side lookups. The partition count is
    /// small and fixed, so a linear scan is acceptable.
    pub const SEARCH_ORDER: [Partition; 4] = [
        Partition::Granular(Granularity::Hourly),
        Partition::Granular(Granularity::Daily),
        Partition::Granular(Granularity::Weekly),
        Partition::Others,
    ];

    /// Total, pure mapping from classification to target partition.
    pub fn for_classification(classification: &Classification) -> Partition {
        match classification {
            Classification::Recognized { granularity, .. } => Partition::Granular(*granularity),
            Classification::Unrecognized => Partition::Others,
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            Partition::Granular(granularity) => granularity.token(),
            Partition::Others => "others",
        }
    }
}

/// Partitioned, path-addressable byte storage under a base root.
///
/// One directory per granularity plus the `others` fallback. Artifacts are
/// keyed by (partition, filename); re-storing an existing filename replaces
/// the previous bytes (last-write-wins, no versioning).
pub struct ContentStore {
    base_root: PathBuf,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(base_root: P) -> Self {
        Self {
            base_root: base_root.as_ref().to_path_buf(),
        }
    }

    pub fn base_root(&self) -> &Path {
        &self.base_root
    }

    /// Writes `bytes` to `partition/filename`, replacing any existing
    /// artifact with that name.
    ///
    /// The replace goes through a temp file and a `rename`, which is atomic
    /// on the same filesystem: a reader (or a racing writer of the same
    /// filename) observes either the old bytes or the new bytes in full,
    /// never a torn write. Fails only on underlying I/O errors.
    pub fn store(
        &self,
        partition: Partition,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let dir_path = self.base_root.join(partition.dir_name());
        self.ensure_directory(&dir_path)?;

        let target = dir_path.join(filename);
        let staging = dir_path.join(format!(".{}.{}.tmp", filename, uuid::Uuid::new_v4()));

        let mut file = fs::File::create(&staging).map_err(|e| StorageError::WriteFile {
            path: staging.clone(),
            source: e,
        })?;
        file.write_all(bytes).map_err(|e| StorageError::WriteFile {
            path: staging.clone(),
            source: e,
        })?;

        fs::rename(&staging, &target).map_err(|e| {
            let _ = fs::remove_file(&staging);
            StorageError::WriteFile {
                path: target.clone(),
                source: e,
            }
        })?;

        Ok(target)
    }

    /// Finds an artifact by name, scanning the fixed partition order and
    /// returning the first match.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        Partition::SEARCH_ORDER
            .iter()
            .map(|partition| self.base_root.join(partition.dir_name()).join(filename))
            .find(|path| path.is_file())
    }

    /// Reads an artifact's bytes via `resolve`.
    pub fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self
            .resolve(filename)
            .ok_or_else(|| StorageError::NotFound(filename.to_string()))?;
        fs::read(&path).map_err(|e| StorageError::ReadFile { path, source: e })
    }

    /// Idempotent and race-tolerant: a concurrent creator of the same
    /// partition directory is success, not failure.
    fn ensure_directory(&self, path: &Path) -> Result<(), StorageError> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| StorageError::CreateDirectory {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}
