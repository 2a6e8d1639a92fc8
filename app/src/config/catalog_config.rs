use std::env;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.escuelajs.co/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the catalog GraphQL API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Load catalog configuration from environment variables
    ///
    /// Environment variables:
    /// - CATALOG_GRAPHQL_URL: GraphQL endpoint (default: public catalog API)
    /// - CATALOG_TIMEOUT_SECS: request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let endpoint =
            env::var("CATALOG_GRAPHQL_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = env::var("CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
