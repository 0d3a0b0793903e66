use contracts::domain::a001_attribute_rule::aggregate::{
    AttributeRule, AttributeRuleDto, AttributeRuleId, AttributeRuleListItemDto, RuleListFilter,
};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::enums::criterion::Criterion;
use contracts::enums::tie_break::TieBreak;
use contracts::shared::priority::{self, Resolution};
use uuid::Uuid;

use super::repository::AttributeRuleRepository;
use crate::shared::data::sample_data;
use crate::shared::error::ServiceError;

fn parse_id(id: &str) -> Result<AttributeRuleId, ServiceError> {
    AttributeRuleId::from_string(id).map_err(|_| ServiceError::InvalidId(id.to_string()))
}

/// Создание нового правила
pub async fn create(
    repo: &dyn AttributeRuleRepository,
    dto: AttributeRuleDto,
) -> anyhow::Result<AttributeRuleId> {
    let criterion = Criterion::from_code(&dto.criterion).map_err(ServiceError::from)?;
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| format!("RULE-{}", Uuid::new_v4().simple()));

    let mut aggregate = AttributeRule::new_for_insert(
        code,
        dto.description,
        dto.rule_kind,
        criterion,
        dto.action,
        dto.is_enabled,
        dto.condition,
        dto.customer_message,
        dto.comment,
    );

    // Валидация
    aggregate.validate().map_err(ServiceError::Validation)?;

    // Before write
    aggregate.before_write();

    let id = repo.insert(&aggregate).await?;
    tracing::info!(
        "Created attribute rule {} ({} {} {})",
        aggregate.base.code,
        aggregate.rule_kind,
        aggregate.criterion,
        aggregate.action
    );
    Ok(id)
}

/// Обновление существующего правила
pub async fn update(repo: &dyn AttributeRuleRepository, dto: AttributeRuleDto) -> anyhow::Result<()> {
    let raw_id = dto
        .id
        .clone()
        .ok_or_else(|| ServiceError::InvalidId(String::new()))?;
    let id = parse_id(&raw_id)?;
    let criterion = Criterion::from_code(&dto.criterion).map_err(ServiceError::from)?;

    let mut aggregate = repo
        .get_by_id(id)
        .await?
        .filter(|r| r.is_active_record())
        .ok_or_else(|| ServiceError::NotFound {
            entity: AttributeRule::collection_name(),
            id: raw_id.clone(),
        })?;

    aggregate.update(&dto, criterion);

    // Валидация
    aggregate.validate().map_err(ServiceError::Validation)?;

    // Before write
    aggregate.before_write();

    repo.update(&aggregate).await?;
    tracing::info!("Updated attribute rule {}", aggregate.base.code);
    Ok(())
}

/// Мягкое удаление правила
pub async fn delete(repo: &dyn AttributeRuleRepository, id: &str) -> anyhow::Result<bool> {
    let id = parse_id(id)?;
    let deleted = repo.soft_delete(id).await?;
    if deleted {
        tracing::info!("Deleted attribute rule {}", id.value());
    }
    Ok(deleted)
}

/// Получение правила по ID
pub async fn get_by_id(
    repo: &dyn AttributeRuleRepository,
    id: &str,
) -> anyhow::Result<Option<AttributeRule>> {
    let id = parse_id(id)?;
    Ok(repo
        .get_by_id(id)
        .await?
        .filter(|r| r.is_active_record()))
}

/// Список правил для страницы управления
pub async fn list_filtered(
    repo: &dyn AttributeRuleRepository,
    filter: &RuleListFilter,
) -> anyhow::Result<Vec<AttributeRuleListItemDto>> {
    Ok(repo
        .list_all()
        .await?
        .iter()
        .filter(|r| filter.matches(r))
        .map(AttributeRule::to_list_item)
        .collect())
}

/// Какое из двух правил действует на товар.
///
/// Оба правила должны существовать, быть включены и различаться.
pub async fn resolve_pair(
    repo: &dyn AttributeRuleRepository,
    primary_id: &str,
    challenger_id: &str,
    tie_break: TieBreak,
) -> anyhow::Result<Resolution> {
    if parse_id(primary_id)? == parse_id(challenger_id)? {
        return Err(ServiceError::Validation(format!(
            "Rule {} cannot be resolved against itself",
            primary_id
        ))
        .into());
    }
    let primary = load_applicable(repo, primary_id).await?;
    let challenger = load_applicable(repo, challenger_id).await?;
    Ok(priority::resolve(&primary, &challenger, tie_break))
}

async fn load_applicable(
    repo: &dyn AttributeRuleRepository,
    id: &str,
) -> anyhow::Result<AttributeRule> {
    let rule = get_by_id(repo, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            entity: AttributeRule::collection_name(),
            id: id.to_string(),
        })?;
    if !rule.is_enabled {
        return Err(
            ServiceError::Validation(format!("Rule {} is disabled", rule.base.code)).into(),
        );
    }
    Ok(rule)
}

/// Вставка тестовых данных. Правила с уже существующими кодами пропускаются.
pub async fn insert_test_data(repo: &dyn AttributeRuleRepository) -> anyhow::Result<usize> {
    let inserted = seed_rules(repo, sample_data::sample_rules()).await?;
    tracing::info!("Inserted {} sample attribute rules", inserted);
    Ok(inserted)
}

async fn seed_rules(
    repo: &dyn AttributeRuleRepository,
    rules: Vec<AttributeRule>,
) -> anyhow::Result<usize> {
    let mut inserted = 0;
    for rule in rules {
        if repo.get_by_code(&rule.base.code).await?.is_some() {
            continue;
        }
        rule.validate().map_err(ServiceError::Validation)?;
        repo.insert(&rule).await?;
        inserted += 1;
    }
    Ok(inserted)
}
