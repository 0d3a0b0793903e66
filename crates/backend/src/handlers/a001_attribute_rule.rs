use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_attribute_rule::aggregate::{
    AttributeRule, AttributeRuleDto, AttributeRuleListItemDto, RuleListFilter, StatusFilter,
};
use contracts::domain::common::AggregateId;
use contracts::enums::criterion::Criterion;
use contracts::enums::rule_kind::RuleKind;
use contracts::enums::tie_break::TieBreak;
use contracts::shared::priority::{self, Resolution};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{a001_attribute_rule, a002_catalog_product};
use crate::shared::data::store::SharedStore;
use crate::shared::error::{into_status, ServiceError};

/// Параметры фильтра списка правил. "all" или пустое значение не фильтрует.
#[derive(Debug, Default, Deserialize)]
pub struct RuleListQuery {
    pub kind: Option<String>,
    pub status: Option<String>,
    pub criterion: Option<String>,
    pub search: Option<String>,
}

fn selected(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl RuleListQuery {
    pub fn to_filter(&self) -> Result<RuleListFilter, ServiceError> {
        let rule_kind = match selected(&self.kind) {
            Some(code) => Some(
                RuleKind::from_code(code)
                    .ok_or_else(|| ServiceError::Validation(format!("Unknown rule kind: {}", code)))?,
            ),
            None => None,
        };
        let status = match selected(&self.status) {
            None => StatusFilter::All,
            Some("active") => StatusFilter::Active,
            Some("inactive") => StatusFilter::Inactive,
            Some(other) => {
                return Err(ServiceError::Validation(format!("Unknown status: {}", other)))
            }
        };
        let criterion = selected(&self.criterion)
            .map(Criterion::from_code)
            .transpose()?;

        Ok(RuleListFilter {
            rule_kind,
            status,
            criterion,
            search: self.search.clone().unwrap_or_default(),
        })
    }
}

/// GET /api/attribute_rule
pub async fn list_all(
    State(store): State<SharedStore>,
    Query(query): Query<RuleListQuery>,
) -> Result<Json<Vec<AttributeRuleListItemDto>>, StatusCode> {
    let filter = query
        .to_filter()
        .map_err(|e| into_status("list attribute rules", e.into()))?;
    match a001_attribute_rule::service::list_filtered(store.rules.as_ref(), &filter).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(into_status("list attribute rules", e)),
    }
}

/// GET /api/attribute_rule/:id
pub async fn get_by_id(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<AttributeRule>, StatusCode> {
    match a001_attribute_rule::service::get_by_id(store.rules.as_ref(), &id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(into_status("get attribute rule", e)),
    }
}

/// POST /api/attribute_rule
pub async fn upsert(
    State(store): State<SharedStore>,
    Json(dto): Json<AttributeRuleDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => a001_attribute_rule::service::update(store.rules.as_ref(), dto)
            .await
            .map(|_| id),
        None => a001_attribute_rule::service::create(store.rules.as_ref(), dto)
            .await
            .map(|id| id.as_string()),
    };
    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err(into_status("save attribute rule", e)),
    }
}

/// DELETE /api/attribute_rule/:id
pub async fn delete(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<(), StatusCode> {
    match a001_attribute_rule::service::delete(store.rules.as_ref(), &id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(into_status("delete attribute rule", e)),
    }
}

/// GET /api/attribute_rule/priority/:criterion
pub async fn priority_of(Path(criterion): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match Criterion::from_code(&criterion) {
        Ok(c) => Ok(Json(json!({
            "criterion": c,
            "tier": priority::tier_of(c),
        }))),
        Err(e) => Err(into_status("priority lookup", ServiceError::from(e).into())),
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(rename = "primaryId")]
    pub primary_id: String,
    #[serde(rename = "challengerId")]
    pub challenger_id: String,
    /// Если не задано, берётся из настроек
    #[serde(rename = "tieBreak")]
    pub tie_break: Option<TieBreak>,
}

/// POST /api/attribute_rule/resolve
pub async fn resolve(
    State(store): State<SharedStore>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<Resolution>, StatusCode> {
    let tie_break = match req.tie_break {
        Some(policy) => policy,
        None => store.settings().await.tie_break,
    };
    match a001_attribute_rule::service::resolve_pair(
        store.rules.as_ref(),
        &req.primary_id,
        &req.challenger_id,
        tie_break,
    )
    .await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(into_status("resolve attribute rules", e)),
    }
}

/// POST /api/attribute_rule/testdata
///
/// Загружает демонстрационные правила и товары каталога.
pub async fn insert_test_data(State(store): State<SharedStore>) -> StatusCode {
    let result = async {
        a001_attribute_rule::service::insert_test_data(store.rules.as_ref()).await?;
        a002_catalog_product::service::insert_test_data(store.catalog.as_ref(), store.rules.as_ref())
            .await
    }
    .await;
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => into_status("insert test data", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use contracts::shared::priority::ClassifierError;

    fn query(kind: &str, status: &str, criterion: &str) -> RuleListQuery {
        RuleListQuery {
            kind: Some(kind.to_string()),
            status: Some(status.to_string()),
            criterion: Some(criterion.to_string()),
            search: None,
        }
    }

    #[test]
    fn test_all_means_no_filter() {
        let filter = query("all", "all", "all").to_filter().unwrap();
        assert_eq!(filter, RuleListFilter::default());
        assert_eq!(RuleListQuery::default().to_filter().unwrap(), RuleListFilter::default());
    }

    #[test]
    fn test_query_to_filter() {
        let filter = query("URSEC", "inactive", "Categoría").to_filter().unwrap();
        assert_eq!(filter.rule_kind, Some(RuleKind::Regulatory));
        assert_eq!(filter.status, StatusFilter::Inactive);
        assert_eq!(filter.criterion, Some(Criterion::Category));
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert_matches!(
            query("all", "all", "Marca").to_filter(),
            Err(ServiceError::Classifier(ClassifierError::InvalidCriterion(_)))
        );
        assert_matches!(
            query("Greylist", "all", "all").to_filter(),
            Err(ServiceError::Validation(_))
        );
        assert_matches!(
            query("all", "paused", "all").to_filter(),
            Err(ServiceError::Validation(_))
        );
    }
}
