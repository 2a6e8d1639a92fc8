use crate::domain::cart::model::CartItem;
use crate::domain::cart::repository::AddToCartParams;

/// Adds a product to an item list, merging on product identity.
///
/// A product already in the list only gets its quantity bumped; the stored
/// title, price and image stay as captured at first add, even when the
/// incoming snapshot differs.
pub struct AddToCart;

impl AddToCart {
    pub fn execute(&self, current_items: &[CartItem], product: &AddToCartParams) -> Vec<CartItem> {
        let mut items = current_items.to_vec();

        if let Some(existing) = items
            .iter_mut()
            .find(|item| item.product_id == product.product_id)
        {
            *existing = existing.with_quantity(existing.quantity + 1);
            return items;
        }

        items.push(CartItem::new(
            product.product_id,
            product.title.clone(),
            product.price,
            product.image_url.clone(),
            1,
        ));
        items
    }
}
