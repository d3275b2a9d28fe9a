use tokio::sync::broadcast;

/// Phases of a single ingestion, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestPhase {
    Validating,
    Classifying,
    Storing,
    Cataloging,
}

impl IngestPhase {
    pub fn name(&self) -> &'static str {
        match self {
            IngestPhase::Validating => "validating",
            IngestPhase::Classifying => "classifying",
            IngestPhase::Storing => "storing",
            IngestPhase::Cataloging => "cataloging",
        }
    }
}

/// Events emitted by the pipeline during ingestion.
pub enum ProgressEvent {
    Phase {
        phase: IngestPhase,
        message: String,
    },
    Completed {
        stored_path: String,
        partition: String,
        catalog_id: Option<i64>,
    },
    Failed {
        error: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// A flattened ingest progress record carried over the broadcast channel.
#[derive(Debug, Clone)]
pub struct IngestEvent {
    pub upload_id: String,
    pub filename: String,
    pub phase: String,
    pub message: String,
}

/// Bridges pipeline events onto a broadcast channel the transport layer
/// subscribes to.
pub struct BroadcastProgress {
    upload_id: String,
    filename: String,
    sender: broadcast::Sender<IngestEvent>,
}

impl BroadcastProgress {
    pub fn new(upload_id: &str, filename: &str, sender: broadcast::Sender<IngestEvent>) -> Self {
        Self {
            upload_id: upload_id.to_string(),
            filename: filename.to_string(),
            sender,
        }
    }

    fn emit(&self, phase: &str, message: String) {
        // A send error only means no subscriber is currently listening.
        let _ = self.sender.send(IngestEvent {
            upload_id: self.upload_id.clone(),
            filename: self.filename.clone(),
            phase: phase.to_string(),
            message,
        });
    }
}

impl ProgressReporter for BroadcastProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Phase { phase, message } => {
                self.emit(phase.name(), message);
            }
            ProgressEvent::Completed {
                stored_path,
                partition,
                catalog_id,
            } => {
                let message = match catalog_id {
                    Some(id) => format!("Stored at {} (catalog id {})", stored_path, id),
                    None => format!("Stored at {} under {}", stored_path, partition),
                };
                self.emit("completed", message);
            }
            ProgressEvent::Failed { error } => {
                self.emit("failed", error);
            }
        }
    }
}
