pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod sanitize;
pub mod storage;
pub mod upload;

pub use classifier::{Classification, EnergyKind, FilenameClassifier, Granularity};
pub use config::{load_config, CatalogConfig, Config};
pub use db::{CatalogEntry, Database, DatabaseError};
pub use error::{ConfigError, GridvaultError, Result, StorageError};
pub use pipeline::{IngestReceipt, IngestWarning, Pipeline, PipelineConfig, PipelineError};
pub use query::{QueryError, QuerySurface};
pub use storage::{ContentStore, Partition};
pub use upload::{EntryPoint, Upload};
