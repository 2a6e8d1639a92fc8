use crate::domain::cart::model::CartItem;

/// Sets the quantity of one line. Zero or negative is the remove signal, not
/// an error; an unknown product id leaves the list unchanged (no implicit
/// add-on-update).
pub struct UpdateQuantity;

impl UpdateQuantity {
    pub fn execute(&self, current_items: &[CartItem], product_id: u64, quantity: i32) -> Vec<CartItem> {
        if quantity <= 0 {
            return current_items
                .iter()
                .filter(|item| item.product_id != product_id)
                .cloned()
                .collect();
        }

        current_items
            .iter()
            .map(|item| {
                if item.product_id == product_id {
                    item.with_quantity(quantity)
                } else {
                    item.clone()
                }
            })
            .collect()
    }
}
