//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use gridvault::classifier::{EnergyKind, Granularity};
use gridvault::config::{CatalogConfig, Config};
use gridvault::upload::{EntryPoint, Upload};

/// Builder for creating `Config` instances.
pub struct ConfigBuilder {
    version: String,
    storage_root: String,
    catalog_path: Option<String>,
}

impl ConfigBuilder {
    /// Create a new builder with sensible defaults for testing.
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            storage_root: "/tmp/gridvault/storage".to_string(),
            catalog_path: None,
        }
    }

    /// Set the config version.
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Set the storage root.
    pub fn storage_root(mut self, path: &str) -> Self {
        self.storage_root = path.to_string();
        self
    }

    /// Set the catalog database path.
    pub fn catalog_path(mut self, path: &str) -> Self {
        self.catalog_path = Some(path.to_string());
        self
    }

    /// Build the final Config.
    pub fn build(self) -> Config {
        Config {
            version: self.version,
            storage_root: self.storage_root,
            catalog: CatalogConfig {
                path: self.catalog_path,
            },
        }
    }

    /// Serialize the config as a JSON document for loader tests.
    pub fn to_json(self) -> String {
        serde_json::to_string_pretty(&self.build()).expect("Failed to serialize config")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating `Upload` instances.
pub struct UploadBuilder {
    entry_point: EntryPoint,
    filename: String,
    body: Vec<u8>,
}

impl UploadBuilder {
    pub fn new(filename: &str) -> Self {
        Self {
            entry_point: EntryPoint::DirectJson,
            filename: filename.to_string(),
            body: br#"{"value":1}"#.to_vec(),
        }
    }

    pub fn via(mut self, entry_point: EntryPoint) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn body(mut self, body: &[u8]) -> Self {
        self.body = body.to_vec();
        self
    }

    pub fn build(self) -> Upload {
        Upload::new(self.entry_point, self.filename, self.body)
    }
}

/// A grammar-conforming telemetry filename for the given classification.
pub fn telemetry_filename(granularity: Granularity, kind: EnergyKind) -> String {
    format!(
        "{}_{}_data_2024_01_15T10_30_00_000Z.json",
        granularity.token(),
        kind.token()
    )
}

/// A grammar-conforming filename with a caller-chosen timestamp part, for
/// tests that need several distinct recognized names.
pub fn telemetry_filename_at(
    granularity: Granularity,
    kind: EnergyKind,
    stamp: &str,
) -> String {
    format!(
        "{}_{}_data_{}.json",
        granularity.token(),
        kind.token(),
        stamp
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = ConfigBuilder::new().build();

        assert_eq!(config.version, "1.0");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_builder_json_loads() {
        let json = ConfigBuilder::new()
            .storage_root("/srv/storage")
            .catalog_path("/srv/catalog.db")
            .to_json();

        let config = gridvault::config::load_config_from_str(&json).unwrap();
        assert_eq!(config.storage_root, "/srv/storage");
    }

    #[test]
    fn test_upload_builder() {
        let upload = UploadBuilder::new("a.json").body(b"{}").build();
        assert_eq!(upload.filename, "a.json");
        assert_eq!(upload.bytes, b"{}".to_vec());
    }

    #[test]
    fn test_telemetry_filename_matches_grammar() {
        let filename = telemetry_filename(Granularity::Hourly, EnergyKind::Solar);
        assert_eq!(filename, "hourly_solar_data_2024_01_15T10_30_00_000Z.json");
    }
}
