use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::GetProductsParams;

#[async_trait]
pub trait GetProductsUseCase: Send + Sync {
    async fn execute(&self, params: GetProductsParams) -> Result<Vec<Product>, ProductError>;
}
