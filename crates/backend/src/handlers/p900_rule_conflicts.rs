use axum::{extract::State, http::StatusCode, Json};
use contracts::projections::p900_rule_conflicts::dto::RuleConflictReportDto;

use crate::projections::p900_rule_conflicts::service;
use crate::shared::data::store::SharedStore;
use crate::shared::error::into_status;

/// GET /api/rule_conflicts
pub async fn list_conflicts(
    State(store): State<SharedStore>,
) -> Result<Json<RuleConflictReportDto>, StatusCode> {
    match service::report(&store).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(into_status("detect rule conflicts", e)),
    }
}
