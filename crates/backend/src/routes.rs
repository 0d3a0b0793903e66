use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::shared::data::store::SharedStore;

/// Конфигурация всех роутов приложения
pub fn configure_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Attribute rules
        // ========================================
        .route(
            "/api/attribute_rule",
            get(handlers::a001_attribute_rule::list_all).post(handlers::a001_attribute_rule::upsert),
        )
        .route(
            "/api/attribute_rule/:id",
            get(handlers::a001_attribute_rule::get_by_id)
                .delete(handlers::a001_attribute_rule::delete),
        )
        .route(
            "/api/attribute_rule/testdata",
            post(handlers::a001_attribute_rule::insert_test_data),
        )
        .route(
            "/api/attribute_rule/priority/:criterion",
            get(handlers::a001_attribute_rule::priority_of),
        )
        .route(
            "/api/attribute_rule/resolve",
            post(handlers::a001_attribute_rule::resolve),
        )
        // ========================================
        // A002 Catalog products
        // ========================================
        .route(
            "/api/catalog_product",
            get(handlers::a002_catalog_product::list_all),
        )
        .route(
            "/api/catalog_product/:id",
            get(handlers::a002_catalog_product::get_details),
        )
        // ========================================
        // PROJECTIONS / DASHBOARDS
        // ========================================
        .route(
            "/api/rule_conflicts",
            get(handlers::p900_rule_conflicts::list_conflicts),
        )
        .route(
            "/api/dashboard/rules_overview",
            get(handlers::d400_rules_overview::get_rules_overview),
        )
        // ========================================
        // SETTINGS
        // ========================================
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).post(handlers::settings::update_settings),
        )
        .with_state(store)
}
