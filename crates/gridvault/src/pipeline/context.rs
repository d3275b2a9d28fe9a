use std::path::PathBuf;

use crate::classifier::Classification;
use crate::db::CatalogEntry;
use crate::storage::Partition;
use crate::upload::Upload;

use super::error::IngestWarning;

pub struct IngestContext {
    // Input
    pub upload: Upload,

    // Step 2 result — guaranteed Some after step_classify
    pub classification: Option<Classification>,

    // Step 3+4 results — guaranteed Some after step_store
    pub partition: Option<Partition>,
    pub stored_path: Option<PathBuf>,

    // Step 5 result — Some only for recognized artifacts whose append succeeded
    pub catalog_entry: Option<CatalogEntry>,

    // Non-fatal warnings
    pub warnings: Vec<IngestWarning>,
}

impl IngestContext {
    pub fn new(upload: Upload) -> Self {
        Self {
            upload,
            classification: None,
            partition: None,
            stored_path: None,
            catalog_entry: None,
            warnings: Vec::new(),
        }
    }
}
