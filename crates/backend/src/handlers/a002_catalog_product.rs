use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_catalog_product::aggregate::{CatalogProduct, CatalogProductDetailsDto};

use crate::domain::a002_catalog_product;
use crate::shared::data::store::SharedStore;
use crate::shared::error::into_status;

/// GET /api/catalog_product
pub async fn list_all(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<CatalogProduct>>, StatusCode> {
    match a002_catalog_product::service::list_all(store.catalog.as_ref()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(into_status("list catalog products", e)),
    }
}

/// GET /api/catalog_product/:id
pub async fn get_details(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<CatalogProductDetailsDto>, StatusCode> {
    let settings = store.settings().await;
    match a002_catalog_product::service::get_details(
        store.catalog.as_ref(),
        store.rules.as_ref(),
        &settings,
        &id,
    )
    .await
    {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(into_status("get catalog product", e)),
    }
}
