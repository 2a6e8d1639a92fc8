use std::sync::Arc;

use crate::application::cart::store::CartStore;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::{
    AddToCartParams, CartListener, CartRepository, Subscription,
};
use crate::domain::cart::use_cases::add_to_cart::AddToCart;
use crate::domain::cart::use_cases::clear_cart::ClearCart;
use crate::domain::cart::use_cases::remove_from_cart::RemoveFromCart;
use crate::domain::cart::use_cases::update_quantity::UpdateQuantity;
use crate::domain::logger::Logger;

/// Stable cart façade over [`CartStore`]: composes the pure use cases with
/// the store's atomic update, so call sites never touch the storage or
/// observation machinery directly.
pub struct CartRepositoryImpl {
    store: Arc<CartStore>,
    logger: Arc<dyn Logger>,
    add: AddToCart,
    remove: RemoveFromCart,
    set_quantity: UpdateQuantity,
    clear: ClearCart,
}

impl CartRepositoryImpl {
    pub fn new(store: Arc<CartStore>, logger: Arc<dyn Logger>) -> Self {
        Self {
            store,
            logger,
            add: AddToCart,
            remove: RemoveFromCart,
            set_quantity: UpdateQuantity,
            clear: ClearCart,
        }
    }
}

impl CartRepository for CartRepositoryImpl {
    fn get_cart(&self) -> Cart {
        self.store.get_cart()
    }

    fn add_to_cart(&self, params: &AddToCartParams) {
        self.store.update(|items| self.add.execute(items, params));

        self.logger.info(&format!(
            "Product {} added to cart, {} items total",
            params.product_id,
            self.store.get_cart().total_items()
        ));
    }

    fn remove_from_cart(&self, product_id: u64) {
        self.store
            .update(|items| self.remove.execute(items, product_id));

        self.logger.info(&format!(
            "Product {product_id} removed from cart, {} items total",
            self.store.get_cart().total_items()
        ));
    }

    fn update_quantity(&self, product_id: u64, quantity: i32) {
        self.store
            .update(|items| self.set_quantity.execute(items, product_id, quantity));

        self.logger.info(&format!(
            "Quantity for product {product_id} set to {quantity}, {} items total",
            self.store.get_cart().total_items()
        ));
    }

    fn clear_cart(&self) {
        self.store.update(|items| self.clear.execute(items));

        self.logger.info("Cart cleared");
    }

    fn subscribe(&self, listener: CartListener) -> Subscription {
        self.store.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::errors::StorageError;
    use crate::domain::storage::KeyValueStorage;

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn quiet_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[derive(Default)]
    struct FakeStorage {
        data: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStorage for FakeStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.data
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.data.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn repository() -> CartRepositoryImpl {
        let store = CartStore::new(Arc::new(FakeStorage::default()), quiet_logger());
        CartRepositoryImpl::new(store, quiet_logger())
    }

    fn params(product_id: u64, title: &str, price: f64) -> AddToCartParams {
        AddToCartParams {
            product_id,
            title: title.to_string(),
            price,
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn should_walk_through_single_product_lifecycle() {
        let repository = repository();

        repository.add_to_cart(&params(1, "A", 10.0));
        let cart = repository.get_cart();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), 10.0);

        repository.add_to_cart(&params(1, "A", 10.0));
        let cart = repository.get_cart();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_price(), 20.0);

        repository.update_quantity(1, 5);
        let cart = repository.get_cart();
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total_price(), 50.0);

        repository.update_quantity(1, 0);
        let cart = repository.get_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0.0);
    }

    #[tokio::test]
    async fn should_keep_remaining_items_after_removal() {
        let repository = repository();

        repository.add_to_cart(&params(1, "A", 100.0));
        repository.add_to_cart(&params(2, "B", 50.0));

        repository.remove_from_cart(1);

        let cart = repository.get_cart();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, 2);
        assert_eq!(cart.total_price(), 50.0);
    }

    #[tokio::test]
    async fn should_clear_everything() {
        let repository = repository();

        repository.add_to_cart(&params(1, "A", 100.0));
        repository.add_to_cart(&params(2, "B", 50.0));

        repository.clear_cart();

        assert!(repository.get_cart().is_empty());
    }

    #[tokio::test]
    async fn should_notify_subscriber_exactly_once_per_mutation() {
        let repository = repository();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = repository.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        repository.add_to_cart(&params(1, "A", 10.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        subscription.unsubscribe();

        repository.add_to_cart(&params(2, "B", 5.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
