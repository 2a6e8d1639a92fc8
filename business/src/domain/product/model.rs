/// Catalog category as displayed in the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub image_url: String,
}

/// Catalog product read model.
///
/// Cart lines snapshot the fields they need at add-time instead of keeping a
/// reference to this.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub category: Category,
}
