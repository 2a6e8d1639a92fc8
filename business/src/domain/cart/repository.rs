use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::cart::model::Cart;

/// Display snapshot handed to `add_to_cart`, already resolved by the caller
/// from the product feature.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCartParams {
    pub product_id: u64,
    pub title: String,
    pub price: f64,
    pub image_url: String,
}

/// Callback invoked with every new cart snapshot.
pub type CartListener = Box<dyn Fn(&Cart) + Send + Sync>;

/// Handle for a registered cart listener.
///
/// `unsubscribe` is idempotent; after the first call returns, the listener is
/// never invoked for subsequent mutations. Dropping the handle without
/// calling it leaves the listener registered for the store's lifetime.
pub struct Subscription {
    active: AtomicBool,
    cancel: Box<dyn Fn() + Send + Sync>,
}

impl Subscription {
    pub fn new(cancel: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            active: AtomicBool::new(true),
            cancel: Box::new(cancel),
        }
    }

    pub fn unsubscribe(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            (self.cancel)();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.active.load(Ordering::Acquire))
            .finish()
    }
}

/// Stable cart contract for presentation callers. Mutations cannot fail from
/// the caller's perspective; persistence problems stay behind this boundary.
pub trait CartRepository: Send + Sync {
    fn get_cart(&self) -> Cart;
    fn add_to_cart(&self, params: &AddToCartParams);
    fn remove_from_cart(&self, product_id: u64);
    fn update_quantity(&self, product_id: u64, quantity: i32);
    fn clear_cart(&self);
    fn subscribe(&self, listener: CartListener) -> Subscription;
}
