use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use order_catalog::{
    setup_tracing, CatalogClient, CatalogConfig, CatalogError, CatalogSystem, Customer, Order,
    OrderDetail, Product,
};

fn print_orders(title: &str, orders: &[Order]) {
    println!("\n=== {} ({} orders) ===", title, orders.len());
    for order in orders {
        println!("{}\n", order);
    }
}

async fn seed(client: &CatalogClient) -> Result<(), CatalogError> {
    let alice = Arc::new(Customer::new(1, "Alice"));
    let bob = Arc::new(Customer::new(2, "Bob"));

    let laptop = Arc::new(Product::new(1, "Laptop", Decimal::from(1000)));
    let phone = Arc::new(Product::new(2, "Phone", Decimal::from(600)));
    let headphones = Arc::new(Product::new(3, "Headphones", Decimal::from(100)));

    let orders = [
        Order::new(
            1,
            alice.clone(),
            vec![
                OrderDetail::new(laptop.clone(), 1),
                OrderDetail::new(headphones, 2),
            ],
        ),
        Order::new(2, bob, vec![OrderDetail::new(phone.clone(), 1)]),
        Order::new(
            3,
            alice,
            vec![OrderDetail::new(laptop, 2), OrderDetail::new(phone, 1)],
        ),
    ];

    for order in orders {
        client.add_order(order).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CatalogError> {
    let config = CatalogConfig::from_env();
    setup_tracing(&config.log_filter);
    config.log_rejected();

    info!(buffer_size = config.buffer_size, "Starting order catalog demo");

    let system = CatalogSystem::new(&config);
    let client = system.catalog_client.clone();

    seed(&client)
        .instrument(tracing::info_span!("seed_catalog"))
        .await?;
    print_orders("All orders", &client.list_orders().await?);

    print_orders("Order 2", &client.query_by_order_id(2).await?);
    print_orders("Orders with a Laptop", &client.query_by_product_name("Laptop").await?);
    print_orders("Orders for Alice", &client.query_by_customer_name("Alice").await?);
    print_orders(
        "Orders totalling at least 1500",
        &client.query_by_min_total(Decimal::from(1500)).await?,
    );

    // Rejected operations are reported, not fatal
    let duplicate = Order::new(
        1,
        Arc::new(Customer::new(3, "Carol")),
        vec![OrderDetail::new(
            Arc::new(Product::new(4, "Mouse", Decimal::new(2550, 2))),
            1,
        )],
    );
    if let Err(e) = client.add_order(duplicate).await {
        error!(error = %e, conflict = e.is_conflict(), "Add failed");
    }
    if let Err(e) = client.remove_order(42).await {
        error!(error = %e, not_found = e.is_not_found(), "Remove failed");
    }

    let mut updated = client
        .get_order(2)
        .await?
        .ok_or(CatalogError::OrderNotFound(2))?;
    updated.customer = Arc::new(Customer::new(1, "Alice"));
    updated.add_detail(OrderDetail::new(
        Arc::new(Product::new(3, "Headphones", Decimal::from(100))),
        2,
    ))?;
    client.replace_order(updated).await?;
    print_orders("Order 2 after update", &client.query_by_order_id(2).await?);

    client.remove_order(1).await?;
    print_orders("After removing order 1", &client.list_orders().await?);

    client.sort_orders().await?;
    print_orders("Sorted by id", &client.list_orders().await?);

    client
        .sort_orders_by(|a, b| b.total_amount().cmp(&a.total_amount()))
        .await?;
    print_orders("Sorted by total, descending", &client.list_orders().await?);

    let snapshot = client.export_json().await?;
    info!(bytes = snapshot.len(), "Exported catalog snapshot");

    system.shutdown().await?;

    info!("Order catalog demo completed");
    Ok(())
}
