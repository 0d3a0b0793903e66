pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod projections;
pub mod routes;
pub mod shared;
pub mod system;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{a001_attribute_rule, a002_catalog_product};
use crate::shared::data::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let settings = config.rules_settings()?;
    tracing::info!(
        "Rules settings: kinds={:?}, tie_break={}",
        settings.enabled_kinds,
        settings.tie_break
    );

    let store = Arc::new(Store::in_memory(settings));

    if config.seed.sample_data {
        a001_attribute_rule::service::insert_test_data(store.rules.as_ref()).await?;
        a002_catalog_product::service::insert_test_data(store.catalog.as_ref(), store.rules.as_ref())
            .await?;
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(store)
        .layer(cors)
        .layer(middleware::from_fn(system::middleware::request_logger));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
