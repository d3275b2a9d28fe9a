//! Inbound upload descriptor handed to the ingestion pipeline by the
//! transport layer.

use std::path::Path;

/// The upload surface an artifact arrived through.
///
/// The direct surface accepts any filename — the naming grammar decides
/// recognition, and unrecognized artifacts land in the fallback partition.
/// The CSV surface hard-rejects anything that is not `.csv` before any
/// bytes touch disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    DirectJson,
    CsvIngest,
}

impl EntryPoint {
    /// The extension this surface insists on, if any.
    pub fn required_extension(&self) -> Option<&'static str> {
        match self {
            EntryPoint::DirectJson => None,
            EntryPoint::CsvIngest => Some("csv"),
        }
    }

    /// Whether `filename` satisfies this surface's extension precondition.
    pub fn accepts(&self, filename: &str) -> bool {
        match self.required_extension() {
            None => true,
            Some(required) => Path::new(filename)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(required))
                .unwrap_or(false),
        }
    }
}

/// A single inbound artifact: externally-supplied filename plus bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub id: String,
    pub entry_point: EntryPoint,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(entry_point: EntryPoint, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            entry_point,
            filename: filename.into(),
            bytes,
        }
    }
}
