use super::catalog_config::CatalogConfig;
use super::storage_config::StorageConfig;

pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            catalog: CatalogConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}
