pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod runner;

pub use config::PipelineConfig;
pub use context::IngestContext;
pub use error::{IngestWarning, PipelineError};
pub use progress::{
    BroadcastProgress, IngestEvent, IngestPhase, NoopProgress, ProgressEvent, ProgressReporter,
};
pub use runner::{IngestReceipt, Pipeline};
