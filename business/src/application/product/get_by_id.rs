use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_by_id::GetProductByIdUseCase;

pub struct GetProductByIdUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductByIdUseCase for GetProductByIdUseCaseImpl {
    async fn execute(&self, id: u64) -> Result<Product, ProductError> {
        self.logger.debug(&format!("Fetching product {id}"));
        let product = self.repository.get_product_by_id(id).await?;
        self.logger.info(&format!("Loaded product {id}"));
        Ok(product)
    }
}
