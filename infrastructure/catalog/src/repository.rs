use async_trait::async_trait;
use serde_json::{Value, json};

use business::domain::product::errors::ProductError;
use business::domain::product::model::Product;
use business::domain::product::repository::{GetProductsParams, ProductRepository};

use crate::client::GraphqlClient;
use crate::dto::{ProductResponseDto, ProductsResponseDto};
use crate::queries;

/// Catalog adapter backed by the GraphQL API.
pub struct ProductRepositoryGraphql {
    client: GraphqlClient,
}

impl ProductRepositoryGraphql {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

fn parse_products(data: Value) -> Result<Vec<Product>, ProductError> {
    let response: ProductsResponseDto =
        serde_json::from_value(data).map_err(|_| ProductError::InvalidData)?;

    Ok(response
        .products
        .into_iter()
        .map(|dto| dto.into_domain())
        .collect())
}

fn parse_product(data: Value) -> Result<Product, ProductError> {
    let response: ProductResponseDto =
        serde_json::from_value(data).map_err(|_| ProductError::InvalidData)?;

    response
        .product
        .map(|dto| dto.into_domain())
        .ok_or(ProductError::NotFound)
}

#[async_trait]
impl ProductRepository for ProductRepositoryGraphql {
    async fn get_products(&self, params: GetProductsParams) -> Result<Vec<Product>, ProductError> {
        let variables = json!({
            "limit": params.limit,
            "offset": params.offset,
        });

        let data = self.client.request(queries::GET_PRODUCTS, variables).await?;
        parse_products(data)
    }

    async fn get_product_by_id(&self, id: u64) -> Result<Product, ProductError> {
        // The API declares ID! as a string scalar.
        let variables = json!({ "id": id.to_string() });

        let data = self
            .client
            .request(queries::GET_PRODUCT_BY_ID, variables)
            .await?;
        parse_product(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_json(id: u64) -> Value {
        json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": 19.99,
            "description": "",
            "images": ["https://example.com/p.png"],
            "category": { "id": 1, "name": "Clothes", "image": "" }
        })
    }

    #[test]
    fn should_parse_product_list_payload() {
        let data = json!({ "products": [product_json(1), product_json(2)] });

        let products = parse_products(data).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[1].title, "Product 2");
    }

    #[test]
    fn should_reject_malformed_list_payload_as_invalid_data() {
        let data = json!({ "products": [{ "id": 1 }] });

        assert!(matches!(
            parse_products(data).unwrap_err(),
            ProductError::InvalidData
        ));
    }

    #[test]
    fn should_parse_single_product_payload() {
        let data = json!({ "product": product_json(7) });

        assert_eq!(parse_product(data).unwrap().id, 7);
    }

    #[test]
    fn should_map_null_product_to_not_found() {
        let data = json!({ "product": null });

        assert!(matches!(
            parse_product(data).unwrap_err(),
            ProductError::NotFound
        ));
    }

    #[test]
    fn should_reject_wrongly_shaped_product_as_invalid_data() {
        let data = json!({ "product": 42 });

        assert!(matches!(
            parse_product(data).unwrap_err(),
            ProductError::InvalidData
        ));
    }
}
