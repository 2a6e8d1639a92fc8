//! Query documents for the catalog GraphQL API.

pub const GET_PRODUCTS: &str = r#"
query GetProducts($limit: Int, $offset: Int) {
  products(limit: $limit, offset: $offset) {
    id
    title
    price
    description
    images
    category {
      id
      name
      image
    }
  }
}
"#;

pub const GET_PRODUCT_BY_ID: &str = r#"
query GetProductById($id: ID!) {
  product(id: $id) {
    id
    title
    price
    description
    images
    category {
      id
      name
      image
    }
  }
}
"#;
