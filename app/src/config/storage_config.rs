use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";

/// Configuration for the on-disk cart storage.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    ///
    /// Environment variables:
    /// - STOREFRONT_DATA_DIR: directory for persisted state (default: "./data")
    pub fn from_env() -> Self {
        let data_dir = env::var("STOREFRONT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Self { data_dir }
    }
}
