use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    /// Base directory for the partitioned content store.
    pub storage_root: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Catalog connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the SQLite database file. When omitted, the canonical
    /// per-user location is used.
    #[serde(default)]
    pub path: Option<String>,
}
