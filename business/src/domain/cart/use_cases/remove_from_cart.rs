use crate::domain::cart::model::CartItem;

/// Drops every line matching the given product identity. No match means an
/// equal-content copy of the input.
pub struct RemoveFromCart;

impl RemoveFromCart {
    pub fn execute(&self, current_items: &[CartItem], product_id: u64) -> Vec<CartItem> {
        current_items
            .iter()
            .filter(|item| item.product_id != product_id)
            .cloned()
            .collect()
    }
}
