use axum::{extract::State, http::StatusCode, Json};
use contracts::dashboards::d400_rules_overview::dto::RulesOverviewResponse;

use crate::dashboards::d400_rules_overview::service;
use crate::shared::data::store::SharedStore;
use crate::shared::error::into_status;

/// GET /api/dashboard/rules_overview
pub async fn get_rules_overview(
    State(store): State<SharedStore>,
) -> Result<Json<RulesOverviewResponse>, StatusCode> {
    match service::get_rules_overview(&store).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(into_status("rules overview", e)),
    }
}
