#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.network")]
    Network,
    #[error("product.not_found")]
    NotFound,
    #[error("product.invalid_data")]
    InvalidData,
}
