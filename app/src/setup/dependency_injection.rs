use std::sync::Arc;

use logger::TracingLogger;
use storage::FileStorage;

use catalog::client::GraphqlClient;
use catalog::repository::ProductRepositoryGraphql;

use business::application::cart::repository::CartRepositoryImpl;
use business::application::cart::store::CartStore;
use business::application::product::get_all::GetProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::domain::cart::repository::CartRepository;
use business::domain::logger::Logger;
use business::domain::product::repository::ProductRepository;
use business::domain::product::use_cases::get_all::GetProductsUseCase;
use business::domain::product::use_cases::get_by_id::GetProductByIdUseCase;
use business::domain::storage::KeyValueStorage;

use crate::config::app_config::AppConfig;

/// One shared cart state and product feature per running application,
/// owned by this container instead of module-level globals. Tests build a
/// fresh instance with their own adapters.
pub struct AppContainer {
    pub cart: Arc<dyn CartRepository>,
    pub cart_store: Arc<CartStore>,
    pub get_products: Arc<dyn GetProductsUseCase>,
    pub get_product_by_id: Arc<dyn GetProductByIdUseCase>,
}

impl AppContainer {
    /// Wires the production adapters. Must be called inside a Tokio runtime;
    /// creating the cart store spawns its hydration and writer tasks.
    pub fn new(config: &AppConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage.data_dir.clone()));

        let graphql_client =
            GraphqlClient::new(config.catalog.endpoint.clone(), config.catalog.timeout);
        let product_repository = Arc::new(ProductRepositoryGraphql::new(graphql_client));

        Self::with_adapters(storage, product_repository, Arc::new(TracingLogger))
    }

    /// Wires the container around caller-supplied adapters. This is the test
    /// seam: in-memory storage and a stubbed catalog produce a fully working
    /// container with no I/O.
    pub fn with_adapters(
        storage: Arc<dyn KeyValueStorage>,
        products: Arc<dyn ProductRepository>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        // Cart feature
        let cart_store = CartStore::new(storage, logger.clone());
        let cart = Arc::new(CartRepositoryImpl::new(
            Arc::clone(&cart_store),
            logger.clone(),
        ));

        // Product use cases
        let get_products = Arc::new(GetProductsUseCaseImpl {
            repository: products.clone(),
            logger: logger.clone(),
        });
        let get_product_by_id = Arc::new(GetProductByIdUseCaseImpl {
            repository: products,
            logger,
        });

        Self {
            cart,
            cart_store,
            get_products,
            get_product_by_id,
        }
    }
}
