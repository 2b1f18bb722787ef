use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_cancellation::adapters::InMemoryOrderRepository;
use order_cancellation::config::AppConfig;
use order_cancellation::domain::order::{BillingAddress, Order, OrderState};
use order_cancellation::http::{self, AppState};
use order_cancellation::metrics::Metrics;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("🚀 Starting order cancellation service");
    tracing::info!("🏬 {} store(s) configured, default '{}'", config.stores.len(), config.default_store);

    if config.uses_dev_secret_key() {
        tracing::warn!("⚠️  Using the development token secret key; set token.secret_key_hex in production");
    }

    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    let repository = InMemoryOrderRepository::new();
    if config.demo_data {
        seed_demo_orders(&repository).await;
        tracing::info!("🌱 Seeded {} demo orders", repository.len().await);
    }

    let state = web::Data::new(AppState::in_memory(&config, repository.clone(), metrics)?);

    if config.demo_data {
        for order in demo_orders().iter().filter(|o| o.is_guest()) {
            let token = state.tokens.encrypt(
                &order.increment_id,
                &order.billing_address.email,
                &order.billing_address.postcode,
            )?;
            tracing::info!(order = %order.increment_id, %token, "🔑 Demo guest token");
        }
    }

    let bind = (config.http.bind.clone(), config.http.port);
    tracing::info!("🌐 Listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(http::configure))
        .bind(bind)?
        .run()
        .await?;

    tracing::info!("👋 Shutdown complete");
    Ok(())
}

fn demo_order(id: i64, customer_id: Option<i64>, state: OrderState, shipped: u32) -> Order {
    let now = Utc::now();
    Order {
        id,
        increment_id: format!("{:09}", 100_000_000 + id),
        store_id: 1,
        customer_id,
        customer_is_guest: customer_id.is_none(),
        state,
        status: state.as_str().to_string(),
        billing_address: BillingAddress {
            firstname: "Veronica".to_string(),
            lastname: "Costello".to_string(),
            email: "roni_cost@example.com".to_string(),
            postcode: "49628-7978".to_string(),
            city: "Calder".to_string(),
            country_id: "US".to_string(),
        },
        shipped_item_count: shipped,
        grand_total_cents: 4_500 + id * 1_000,
        currency_code: "USD".to_string(),
        created_at: now,
        updated_at: now,
        cancellation_reason: None,
    }
}

fn demo_orders() -> Vec<Order> {
    vec![
        demo_order(1, Some(1), OrderState::Processing, 0),
        demo_order(2, Some(1), OrderState::Complete, 2),
        demo_order(3, None, OrderState::New, 0),
        demo_order(4, None, OrderState::Processing, 1),
    ]
}

async fn seed_demo_orders(repository: &InMemoryOrderRepository) {
    for order in demo_orders() {
        repository.insert(order).await;
    }
}
