use axum::{extract::State, http::StatusCode, Json};
use contracts::system::settings::RulesSettings;

use crate::shared::data::store::SharedStore;
use crate::shared::error::into_status;
use crate::system::settings::service;

/// GET /api/settings
pub async fn get_settings(State(store): State<SharedStore>) -> Json<RulesSettings> {
    Json(service::get(&store).await)
}

/// POST /api/settings
pub async fn update_settings(
    State(store): State<SharedStore>,
    Json(settings): Json<RulesSettings>,
) -> Result<Json<RulesSettings>, StatusCode> {
    match service::update(&store, settings).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(into_status("update settings", e)),
    }
}
