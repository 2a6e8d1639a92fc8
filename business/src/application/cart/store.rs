use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::domain::cart::model::{Cart, CartItem};
use crate::domain::cart::repository::{CartListener, Subscription};
use crate::domain::logger::Logger;
use crate::domain::storage::KeyValueStorage;

/// Fixed key under which the serialized item list is stored.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Wire format of one persisted cart line. Totals are never stored; they are
/// recomputed from the items on load.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCartItem {
    product_id: u64,
    title: String,
    price: f64,
    image_url: String,
    quantity: i32,
}

impl StoredCartItem {
    fn from_domain(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            title: item.title.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            quantity: item.quantity,
        }
    }

    fn into_domain(self) -> CartItem {
        CartItem::new(
            self.product_id,
            self.title,
            self.price,
            self.image_url,
            self.quantity,
        )
    }
}

fn encode_items(items: &[CartItem]) -> Result<String, serde_json::Error> {
    let records: Vec<StoredCartItem> = items.iter().map(StoredCartItem::from_domain).collect();
    serde_json::to_string(&records)
}

fn decode_items(raw: &str) -> Result<Vec<CartItem>, serde_json::Error> {
    let records: Vec<StoredCartItem> = serde_json::from_str(raw)?;
    Ok(records.into_iter().map(StoredCartItem::into_domain).collect())
}

/// Owner of the live cart snapshot.
///
/// Mutations run under one lock across read-transform-replace-enqueue-notify,
/// so subscribers observe carts in mutation order and a read-modify-write can
/// never interleave with another. Reads never touch storage. Listeners are
/// invoked synchronously and must not mutate the store from inside the
/// callback.
///
/// Durable writes are fire-and-forget: they flow through an in-process queue
/// drained by a single writer task, which keeps the stored payload in
/// mutation order. Storage failures are logged and swallowed; the in-memory
/// state stays authoritative for the session.
pub struct CartStore {
    /// Serializes mutations; the flag records that a mutation happened, which
    /// makes a slower hydration load stand down.
    mutation: Mutex<bool>,
    state: RwLock<Cart>,
    listeners: Arc<Mutex<Vec<(u64, Arc<CartListener>)>>>,
    next_listener_id: AtomicU64,
    persist_tx: mpsc::UnboundedSender<String>,
    enqueued_writes: AtomicU64,
    persisted_rx: watch::Receiver<u64>,
    hydration_rx: watch::Receiver<bool>,
    logger: Arc<dyn Logger>,
}

impl CartStore {
    /// Spawns the hydration and persistence tasks; must be called from inside
    /// a Tokio runtime.
    pub fn new(storage: Arc<dyn KeyValueStorage>, logger: Arc<dyn Logger>) -> Arc<Self> {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let (persisted_tx, persisted_rx) = watch::channel(0u64);
        let (hydrated_tx, hydration_rx) = watch::channel(false);

        let store = Arc::new(Self {
            mutation: Mutex::new(false),
            state: RwLock::new(Cart::empty()),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
            persist_tx,
            enqueued_writes: AtomicU64::new(0),
            persisted_rx,
            hydration_rx,
            logger: logger.clone(),
        });

        tokio::spawn(Self::run_writer(
            persist_rx,
            persisted_tx,
            Arc::clone(&storage),
            logger.clone(),
        ));
        tokio::spawn(Self::run_hydration(
            Arc::clone(&store),
            storage,
            logger,
            hydrated_tx,
        ));

        store
    }

    /// Current in-memory snapshot; never blocks on storage.
    pub fn get_cart(&self) -> Cart {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Single mutation entry point: applies `transform` to the current item
    /// list, replaces the snapshot, enqueues a durable write and notifies
    /// subscribers, all under the mutation lock.
    pub fn update(&self, transform: impl FnOnce(&[CartItem]) -> Vec<CartItem>) {
        let mut mutated = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        *mutated = true;

        let current = self.get_cart();
        let cart = Cart::build(transform(current.items()));
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = cart.clone();

        match encode_items(cart.items()) {
            Ok(payload) => {
                // The writer task may already be gone during shutdown; the
                // cart stays usable in memory either way.
                if self.persist_tx.send(payload).is_ok() {
                    self.enqueued_writes.fetch_add(1, Ordering::AcqRel);
                }
            }
            Err(err) => self
                .logger
                .error(&format!("Failed to serialize cart items: {err}")),
        }

        self.notify(&cart);
    }

    /// Replaces the item list wholesale. Equivalent to `update(|_| items)`.
    pub fn set_items(&self, items: Vec<CartItem>) {
        self.update(move |_| items);
    }

    /// Registers a listener invoked with every cart produced after this call.
    pub fn subscribe(&self, listener: CartListener) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));

        // The cancel closure must not keep the store alive.
        let listeners = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Completes once the initial load has settled: restored, absent, failed
    /// or superseded by an earlier mutation.
    pub async fn hydration_complete(&self) {
        let mut rx = self.hydration_rx.clone();
        let _ = rx.wait_for(|done| *done).await;
    }

    /// Completes once every write enqueued so far has been handed to storage.
    pub async fn persistence_settled(&self) {
        let target = self.enqueued_writes.load(Ordering::Acquire);
        let mut rx = self.persisted_rx.clone();
        let _ = rx.wait_for(|processed| *processed >= target).await;
    }

    async fn run_writer(
        mut rx: mpsc::UnboundedReceiver<String>,
        persisted_tx: watch::Sender<u64>,
        storage: Arc<dyn KeyValueStorage>,
        logger: Arc<dyn Logger>,
    ) {
        // One queue, one writer: payloads land in storage in mutation order,
        // so the stored list always matches some set_items result and a slow
        // earlier write can never clobber a newer one.
        let mut processed = 0u64;
        while let Some(payload) = rx.recv().await {
            if let Err(err) = storage.set(CART_STORAGE_KEY, &payload).await {
                logger.warn(&format!(
                    "Cart write failed, keeping in-memory state: {err}"
                ));
            }
            processed += 1;
            let _ = persisted_tx.send(processed);
        }
    }

    async fn run_hydration(
        store: Arc<Self>,
        storage: Arc<dyn KeyValueStorage>,
        logger: Arc<dyn Logger>,
        hydrated_tx: watch::Sender<bool>,
    ) {
        match storage.get(CART_STORAGE_KEY).await {
            Ok(Some(raw)) => match decode_items(&raw) {
                Ok(items) => store.install_hydrated(items),
                Err(err) => logger.warn(&format!("Discarding unreadable persisted cart: {err}")),
            },
            Ok(None) => logger.debug("No persisted cart found, starting empty"),
            Err(err) => logger.warn(&format!("Cart hydration failed, starting empty: {err}")),
        }
        let _ = hydrated_tx.send(true);
    }

    /// Installs the persisted item list unless a mutation already replaced
    /// the snapshot; newer in-memory state always wins.
    fn install_hydrated(&self, items: Vec<CartItem>) {
        let mutated = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        if *mutated {
            self.logger.debug("Skipping hydration, cart already mutated");
            return;
        }

        let cart = Cart::build(items);
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = cart.clone();
        self.notify(&cart);
    }

    fn notify(&self, cart: &Cart) {
        // Iterate a snapshot so listeners can subscribe or unsubscribe while
        // the notification is in flight.
        let current: Vec<Arc<CartListener>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in current {
            listener(cart);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use mockall::mock;
    use tokio::sync::Notify;

    use super::*;
    use crate::domain::errors::StorageError;

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

    impl FakeStorage {
        fn seeded(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .data
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            storage
        }

        fn stored(&self, key: &str) -> Option<String> {
            self.data.lock().unwrap().get(key).cloned()
        }
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

    /// Storage whose reads block until released, to race hydration against
    /// user mutations.
    struct GatedStorage {
        inner: FakeStorage,
        gate: Notify,
    }

    impl GatedStorage {
        fn seeded(key: &str, value: &str) -> Self {
            Self {
                inner: FakeStorage::seeded(key, value),
                gate: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl KeyValueStorage for GatedStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.gate.notified().await;
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl KeyValueStorage for FailingStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::ReadFailed)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed)
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed)
        }
    }

    fn item(product_id: u64, price: f64, quantity: i32) -> CartItem {
        CartItem::new(
            product_id,
            format!("Product {product_id}"),
            price,
            String::new(),
            quantity,
        )
    }

    #[test]
    fn should_roundtrip_items_through_camel_case_wire_format() {
        let items = vec![item(1, 12.5, 2)];

        let payload = encode_items(&items).unwrap();

        assert!(payload.contains("\"productId\""));
        assert!(payload.contains("\"imageUrl\""));
        assert!(!payload.contains("totalPrice"));
        assert_eq!(decode_items(&payload).unwrap(), items);
    }

    #[tokio::test]
    async fn should_start_empty_and_recompute_totals_on_set_items() {
        let store = CartStore::new(Arc::new(FakeStorage::default()), quiet_logger());
        assert!(store.get_cart().is_empty());

        store.set_items(vec![item(1, 10.0, 2), item(2, 50.0, 1)]);

        let cart = store.get_cart();
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 70.0);
    }

    #[tokio::test]
    async fn should_notify_subscriber_once_per_mutation_and_stop_after_unsubscribe() {
        let store = CartStore::new(Arc::new(FakeStorage::default()), quiet_logger());
        store.hydration_complete().await;

        let calls = Arc::new(AtomicUsize::new(0));
        let seen_totals = Arc::new(Mutex::new(Vec::new()));
        let counter = Arc::clone(&calls);
        let totals = Arc::clone(&seen_totals);
        let subscription = store.subscribe(Box::new(move |cart| {
            counter.fetch_add(1, Ordering::SeqCst);
            totals.lock().unwrap().push(cart.total_items());
        }));

        store.set_items(vec![item(1, 10.0, 1)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen_totals.lock().unwrap(), vec![1]);

        subscription.unsubscribe();
        subscription.unsubscribe();

        store.set_items(vec![item(1, 10.0, 5)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_hydrate_persisted_items_and_notify() {
        let payload = encode_items(&[item(4, 25.0, 2)]).unwrap();
        let storage = Arc::new(GatedStorage::seeded(CART_STORAGE_KEY, &payload));

        let store = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>, quiet_logger());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _subscription = store.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        storage.gate.notify_one();
        store.hydration_complete().await;

        let cart = store.get_cart();
        assert_eq!(cart.items(), &[item(4, 25.0, 2)]);
        assert_eq!(cart.total_price(), 50.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_treat_unreadable_payload_as_no_persisted_cart() {
        let storage = Arc::new(FakeStorage::seeded(CART_STORAGE_KEY, "not json"));

        let store = CartStore::new(storage, quiet_logger());
        store.hydration_complete().await;

        assert!(store.get_cart().is_empty());
    }

    #[tokio::test]
    async fn should_swallow_hydration_read_failure() {
        let store = CartStore::new(Arc::new(FailingStorage), quiet_logger());
        store.hydration_complete().await;

        assert!(store.get_cart().is_empty());
    }

    #[tokio::test]
    async fn should_let_mutation_win_over_slower_hydration() {
        let payload = encode_items(&[item(9, 5.0, 9)]).unwrap();
        let storage = Arc::new(GatedStorage::seeded(CART_STORAGE_KEY, &payload));

        let store = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>, quiet_logger());
        store.set_items(vec![item(1, 10.0, 1)]);

        storage.gate.notify_one();
        store.hydration_complete().await;

        assert_eq!(store.get_cart().items(), &[item(1, 10.0, 1)]);
    }

    #[tokio::test]
    async fn should_persist_latest_snapshot_in_mutation_order() {
        let storage = Arc::new(FakeStorage::default());

        let store = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>, quiet_logger());
        store.hydration_complete().await;
        store.set_items(vec![item(1, 10.0, 1)]);
        store.set_items(vec![item(1, 10.0, 4)]);
        store.persistence_settled().await;

        let stored = storage.stored(CART_STORAGE_KEY).unwrap();
        assert_eq!(decode_items(&stored).unwrap(), vec![item(1, 10.0, 4)]);
    }

    #[tokio::test]
    async fn should_keep_in_memory_state_when_write_fails() {
        let store = CartStore::new(Arc::new(FailingStorage), quiet_logger());
        store.hydration_complete().await;

        store.set_items(vec![item(1, 10.0, 2)]);
        store.persistence_settled().await;

        assert_eq!(store.get_cart().total_items(), 2);
    }

    #[tokio::test]
    async fn should_apply_update_transform_to_current_items() {
        let store = CartStore::new(Arc::new(FakeStorage::default()), quiet_logger());
        store.set_items(vec![item(1, 10.0, 1)]);

        store.update(|items| {
            let mut next = items.to_vec();
            next.push(item(2, 3.0, 1));
            next
        });

        let ids: Vec<u64> = store.get_cart().items().iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
