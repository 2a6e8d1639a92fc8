use dotenvy::dotenv;

use app::config::app_config::AppConfig;
use app::setup::dependency_injection::AppContainer;
use business::domain::cart::repository::AddToCartParams;
use business::domain::product::repository::GetProductsParams;

/// Storefront Entry Point
///
/// Initializes the application, wires dependencies, and drives a short
/// browse-and-shop session: restore the persisted cart, fetch a catalog page,
/// mutate the cart while a subscriber observes every snapshot.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env();

    // 4. Wire dependencies
    let container = AppContainer::new(&config);

    // 5. Restore the persisted cart before showing anything
    container.cart_store.hydration_complete().await;
    let restored = container.cart.get_cart();
    tracing::info!(
        target: "storefront",
        "Cart restored: {} items, total {:.2}",
        restored.total_items(),
        restored.total_price()
    );

    let subscription = container.cart.subscribe(Box::new(|cart| {
        tracing::info!(
            target: "storefront",
            "Cart changed: {} items, total {:.2}",
            cart.total_items(),
            cart.total_price()
        );
    }));

    // 6. Browse a catalog page and shop from it
    let products = container
        .get_products
        .execute(GetProductsParams {
            limit: Some(4),
            offset: Some(0),
        })
        .await?;
    anyhow::ensure!(!products.is_empty(), "catalog returned no products");

    for product in &products {
        tracing::info!(
            target: "storefront",
            "Catalog: #{} {} at {:.2}",
            product.id,
            product.title,
            product.price
        );
    }

    let first = &products[0];
    let params = AddToCartParams {
        product_id: first.id,
        title: first.title.clone(),
        price: first.price,
        image_url: first.images.first().cloned().unwrap_or_default(),
    };

    container.cart.add_to_cart(&params);
    container.cart.add_to_cart(&params);
    container.cart.update_quantity(first.id, 5);

    if let Some(second) = products.get(1) {
        container.cart.add_to_cart(&AddToCartParams {
            product_id: second.id,
            title: second.title.clone(),
            price: second.price,
            image_url: second.images.first().cloned().unwrap_or_default(),
        });
        container.cart.remove_from_cart(second.id);
    }

    subscription.unsubscribe();

    // 7. Let the queued writes reach disk before exiting
    container.cart_store.persistence_settled().await;

    let cart = container.cart.get_cart();
    tracing::info!(
        target: "storefront",
        "Session done: {} items, total {:.2}",
        cart.total_items(),
        cart.total_price()
    );

    Ok(())
}
