use std::path::PathBuf;

use crate::config::Config;
use crate::db;

pub struct PipelineConfig {
    pub storage_root: PathBuf,
    pub database_path: PathBuf,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        let database_path = config
            .catalog
            .path
            .as_ref()
            .map(PathBuf::from)
            .or_else(db::default_database_path)
            .unwrap_or_else(|| PathBuf::from("gridvault.db"));

        Self {
            storage_root: PathBuf::from(&config.storage_root),
            database_path,
        }
    }
}
