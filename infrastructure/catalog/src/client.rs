use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};

use business::domain::product::errors::ProductError;

/// Shared HTTP client configuration for the catalog GraphQL API.
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self { client, endpoint }
    }

    /// Posts a query document and returns the response `data` payload.
    ///
    /// Transport problems, non-success statuses and GraphQL-level errors all
    /// surface as [`ProductError::Network`]; shape validation of the payload
    /// is the caller's job.
    pub async fn request(&self, query: &str, variables: Value) -> Result<Value, ProductError> {
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|_| ProductError::Network)?;

        if !response.status().is_success() {
            return Err(ProductError::Network);
        }

        let envelope: Value = response.json().await.map_err(|_| ProductError::Network)?;

        if let Some(errors) = envelope.get("errors")
            && errors.as_array().is_some_and(|list| !list.is_empty())
        {
            return Err(ProductError::Network);
        }

        envelope
            .get("data")
            .cloned()
            .ok_or(ProductError::Network)
    }
}
