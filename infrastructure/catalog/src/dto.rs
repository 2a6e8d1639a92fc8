use serde::{Deserialize, Deserializer};

use business::domain::product::model::{Category, Product};

/// Accepts both numeric and string ids; the API is not consistent about
/// which one it returns across entities.
fn flexible_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(raw) => raw.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryDto {
    #[serde(deserialize_with = "flexible_id")]
    pub id: u64,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductDto {
    #[serde(deserialize_with = "flexible_id")]
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub category: CategoryDto,
}

#[derive(Debug, Deserialize)]
pub struct ProductsResponseDto {
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Deserialize)]
pub struct ProductResponseDto {
    pub product: Option<ProductDto>,
}

impl ProductDto {
    pub fn into_domain(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            images: self.images,
            category: Category {
                id: self.category.id,
                name: self.category.name,
                image_url: self.category.image,
            },
        }
    }
}
