/// One distinct product line in the cart: product identity, a display
/// snapshot captured at add-time, and the quantity.
///
/// The snapshot fields are never re-fetched; if the catalog changes after the
/// item was added, the stored title, image and price stay as they were.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: u64,
    pub title: String,
    pub price: f64,
    pub image_url: String,
    pub quantity: i32,
}

impl CartItem {
    /// Constructs an item verbatim from the given fields. Quantity bounds are
    /// the use cases' responsibility, not the constructor's.
    pub fn new(product_id: u64, title: String, price: f64, image_url: String, quantity: i32) -> Self {
        Self {
            product_id,
            title,
            price,
            image_url,
            quantity,
        }
    }

    /// Copy of this item with the quantity replaced.
    pub fn with_quantity(&self, quantity: i32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

/// Immutable cart snapshot: insertion-ordered items plus derived totals.
///
/// Fields are private so the totals can never be set independently of the
/// item list; every construction path goes through the same fold.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    total_items: i64,
    total_price: f64,
}

impl Cart {
    /// The canonical empty cart.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: 0.0,
        }
    }

    /// Aggregate totals over an item list: sum of quantities and sum of
    /// price times quantity, as a plain left-to-right double fold.
    pub fn compute_totals(items: &[CartItem]) -> (i64, f64) {
        let total_items = items.iter().map(|item| i64::from(item.quantity)).sum();
        let total_price = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        (total_items, total_price)
    }

    /// Builds a snapshot owning `items`; both totals derive from that list.
    pub fn build(items: Vec<CartItem>) -> Self {
        let (total_items, total_price) = Self::compute_totals(&items);
        Self {
            items,
            total_items,
            total_price,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
