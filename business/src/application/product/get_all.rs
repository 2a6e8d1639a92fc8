use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::{GetProductsParams, ProductRepository};
use crate::domain::product::use_cases::get_all::GetProductsUseCase;

const DEFAULT_LIMIT: u32 = 20;
const DEFAULT_OFFSET: u32 = 0;

pub struct GetProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductsUseCase for GetProductsUseCaseImpl {
    async fn execute(&self, params: GetProductsParams) -> Result<Vec<Product>, ProductError> {
        let params = GetProductsParams {
            limit: Some(params.limit.unwrap_or(DEFAULT_LIMIT)),
            offset: Some(params.offset.unwrap_or(DEFAULT_OFFSET)),
        };

        self.logger.debug(&format!(
            "Fetching products: limit={} offset={}",
            params.limit.unwrap_or_default(),
            params.offset.unwrap_or_default()
        ));

        let products = self.repository.get_products(params).await?;

        self.logger
            .info(&format!("Loaded {} products", products.len()));
        Ok(products)
    }
}
