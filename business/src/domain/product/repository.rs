use async_trait::async_trait;

use super::errors::ProductError;
use super::model::Product;

/// Paging window for catalog queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetProductsParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_products(&self, params: GetProductsParams) -> Result<Vec<Product>, ProductError>;
    async fn get_product_by_id(&self, id: u64) -> Result<Product, ProductError>;
}
