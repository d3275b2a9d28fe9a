use std::path::PathBuf;

use tracing::{debug, info_span, warn};

use crate::classifier::{Classification, FilenameClassifier};
use crate::db::{catalog_repo, CatalogEntry, Database, DatabaseError};
use crate::sanitize;
use crate::storage::{ContentStore, Partition};
use crate::upload::Upload;

use super::config::PipelineConfig;
use super::context::IngestContext;
use super::error::{IngestWarning, PipelineError};
use super::progress::{IngestPhase, ProgressEvent, ProgressReporter};

/// Receipt for a completed ingestion.
#[derive(Debug)]
pub struct IngestReceipt {
    pub upload_id: String,
    pub filename: String,
    pub classification: Classification,
    pub partition: Partition,
    pub stored_path: PathBuf,
    /// Present when the classification was recognized and the catalog
    /// append succeeded.
    pub catalog_entry: Option<CatalogEntry>,
    pub warnings: Vec<IngestWarning>,
}

pub struct Pipeline {
    classifier: FilenameClassifier,
    store: ContentStore,
    db: Database,
}

impl Pipeline {
    /// Production constructor — opens the catalog database and builds the
    /// content store from config.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, DatabaseError> {
        let db = Database::open(&config.database_path)?;
        Ok(Self::new(ContentStore::new(&config.storage_root), db))
    }

    /// Constructor with injected sub-components. The storage root and the
    /// catalog handle are explicit arguments; the pipeline holds no
    /// ambient state.
    pub fn new(store: ContentStore, db: Database) -> Self {
        Self {
            classifier: FilenameClassifier::new(),
            store,
            db,
        }
    }

    /// Runs the full ingestion for a single upload.
    ///
    /// Steps are strictly ordered: precondition check, classify, store,
    /// catalog. Bytes are durably stored before any catalog append, so a
    /// catalog entry never references an artifact that failed to store. A
    /// crash between store and catalog leaves an orphaned artifact, which
    /// is recoverable by re-upload.
    pub fn ingest(
        &self,
        upload: Upload,
        progress: &dyn ProgressReporter,
    ) -> Result<IngestReceipt, PipelineError> {
        let _pipeline_span = info_span!("ingest",
            upload_id = %upload.id,
            filename = %upload.filename,
        )
        .entered();

        let mut ctx = IngestContext::new(upload);

        // Step 1: preconditions — nothing may touch disk if these fail
        {
            let _step = info_span!("validate").entered();
            progress.report(ProgressEvent::Phase {
                phase: IngestPhase::Validating,
                message: "Validating upload...".to_string(),
            });
            if let Err(e) = self.step_validate(&ctx) {
                progress.report(ProgressEvent::Failed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        }

        // Step 2: classify (pure, filename-only)
        {
            let _step = info_span!("classify").entered();
            progress.report(ProgressEvent::Phase {
                phase: IngestPhase::Classifying,
                message: "Classifying filename...".to_string(),
            });
            self.step_classify(&mut ctx);
        }

        // Step 3+4: resolve partition and store bytes
        {
            let _step = info_span!("store").entered();
            progress.report(ProgressEvent::Phase {
                phase: IngestPhase::Storing,
                message: "Storing artifact...".to_string(),
            });
            if let Err(e) = self.step_store(&mut ctx) {
                progress.report(ProgressEvent::Failed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        }

        // Step 5: catalog (recognized artifacts only; failure is non-fatal)
        {
            let _step = info_span!("catalog").entered();
            progress.report(ProgressEvent::Phase {
                phase: IngestPhase::Cataloging,
                message: "Recording catalog entry...".to_string(),
            });
            self.step_catalog(&mut ctx);
        }

        let classification = ctx.classification.expect("classification set in step 2");
        let partition = ctx.partition.expect("partition set in step 3");
        let stored_path = ctx.stored_path.clone().expect("stored_path set in step 4");

        progress.report(ProgressEvent::Completed {
            stored_path: stored_path.display().to_string(),
            partition: partition.dir_name().to_string(),
            catalog_id: ctx.catalog_entry.as_ref().map(|e| e.id),
        });

        Ok(IngestReceipt {
            upload_id: ctx.upload.id.clone(),
            filename: ctx.upload.filename.clone(),
            classification,
            partition,
            stored_path,
            catalog_entry: ctx.catalog_entry,
            warnings: ctx.warnings,
        })
    }

    fn step_validate(&self, ctx: &IngestContext) -> Result<(), PipelineError> {
        let filename = &ctx.upload.filename;

        if filename.is_empty() {
            return Err(PipelineError::Rejected {
                reason: "Filename is empty".to_string(),
            });
        }
        // Uploads are untrusted; a filename must be a single path component.
        if filename.contains('/') || filename.contains('\\') {
            return Err(PipelineError::Rejected {
                reason: format!("Filename contains path separators: {}", filename),
            });
        }
        if filename == "." || filename == ".." {
            return Err(PipelineError::Rejected {
                reason: format!("Filename is a relative path component: {}", filename),
            });
        }
        if !ctx.upload.entry_point.accepts(filename) {
            let required = ctx
                .upload
                .entry_point
                .required_extension()
                .unwrap_or("any");
            return Err(PipelineError::Rejected {
                reason: format!(
                    "Entry point requires a .{} file, got: {}",
                    required, filename
                ),
            });
        }
        Ok(())
    }

    fn step_classify(&self, ctx: &mut IngestContext) {
        let classification = self.classifier.classify(&ctx.upload.filename);
        debug!("Classified {} as {:?}", ctx.upload.filename, classification);
        ctx.classification = Some(classification);
    }

    fn step_store(&self, ctx: &mut IngestContext) -> Result<(), PipelineError> {
        let classification = ctx.classification.expect("step 2 completed");
        let partition = Partition::for_classification(&classification);

        let stored_path = self
            .store
            .store(partition, &ctx.upload.filename, &ctx.upload.bytes)?;

        debug!(
            "Stored {} -> {} (partition: {})",
            ctx.upload.filename,
            sanitize::redact_path(&stored_path),
            partition.dir_name()
        );

        ctx.partition = Some(partition);
        ctx.stored_path = Some(stored_path);
        Ok(())
    }

    fn step_catalog(&self, ctx: &mut IngestContext) {
        let granularity = match ctx.classification {
            Some(Classification::Recognized { granularity, .. }) => granularity,
            _ => return,
        };

        match catalog_repo::append(&self.db, granularity, &ctx.upload.filename) {
            Ok(entry) => {
                debug!(
                    "Cataloged {} in {} (id: {})",
                    ctx.upload.filename,
                    granularity.table_name(),
                    entry.id
                );
                ctx.catalog_entry = Some(entry);
            }
            Err(e) => {
                warn!(
                    "Catalog append failed for {} (artifact remains stored): {}",
                    ctx.upload.filename, e
                );
                ctx.warnings.push(IngestWarning::CatalogAppendFailed {
                    granularity,
                    error: e.to_string(),
                });
            }
        }
    }
}
