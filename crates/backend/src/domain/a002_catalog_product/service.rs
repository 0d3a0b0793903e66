use contracts::domain::a001_attribute_rule::aggregate::AttributeRule;
use contracts::domain::a002_catalog_product::aggregate::{
    CatalogProduct, CatalogProductDetailsDto, CatalogProductId,
};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::enums::rule_action::RuleAction;
use contracts::shared::priority::{self, Resolution};
use contracts::system::settings::RulesSettings;

use super::repository::ProductCatalog;
use crate::domain::a001_attribute_rule::repository::AttributeRuleRepository;
use crate::shared::data::sample_data;
use crate::shared::error::ServiceError;

/// Получение списка всех товаров
pub async fn list_all(catalog: &dyn ProductCatalog) -> anyhow::Result<Vec<CatalogProduct>> {
    catalog.list_all().await
}

/// Не удалённые правила, привязанные к товару
pub async fn applicable_rules(
    catalog: &dyn ProductCatalog,
    rules: &dyn AttributeRuleRepository,
    product_id: CatalogProductId,
) -> anyhow::Result<Vec<AttributeRule>> {
    let ids = catalog.applicable_rules(product_id).await?;
    rules.get_many(&ids).await
}

/// Правило участвует в разрешении: включено, не удалено, его тип включён в настройках
pub fn is_effective(rule: &AttributeRule, settings: &RulesSettings) -> bool {
    rule.is_applicable() && settings.is_kind_enabled(rule.rule_kind)
}

/// Текст для покупателя, если итог - исключение.
///
/// Берётся сообщение правила-победителя, пустое заменяется общим текстом из настроек.
pub fn customer_message(
    rules: &[&AttributeRule],
    resolution: &Resolution,
    settings: &RulesSettings,
) -> Option<String> {
    if resolution.effective_action != RuleAction::Exclude {
        return None;
    }
    let own = rules
        .iter()
        .find(|r| r.base.id == resolution.winning_rule_id)
        .and_then(|r| r.customer_message.as_deref())
        .map(str::trim)
        .filter(|m| !m.is_empty());
    Some(own.unwrap_or(&settings.blocked_product_message).to_string())
}

/// Карточка товара: применимые правила, итог и сообщение покупателю
pub async fn get_details(
    catalog: &dyn ProductCatalog,
    rules: &dyn AttributeRuleRepository,
    settings: &RulesSettings,
    id: &str,
) -> anyhow::Result<Option<CatalogProductDetailsDto>> {
    let id = CatalogProductId::from_string(id).map_err(|_| ServiceError::InvalidId(id.to_string()))?;
    let product = match catalog.get_by_id(id).await? {
        Some(p) if p.is_active_record() => p,
        _ => return Ok(None),
    };
    let applicable = applicable_rules(catalog, rules, id).await?;

    let effective: Vec<&AttributeRule> = applicable
        .iter()
        .filter(|r| is_effective(r, settings))
        .collect();
    let resolution = priority::resolve_all(&effective, settings.tie_break);
    let message = resolution
        .as_ref()
        .and_then(|r| customer_message(&effective, r, settings));

    Ok(Some(CatalogProductDetailsDto {
        product,
        applicable_rules: applicable.iter().map(AttributeRule::to_list_item).collect(),
        resolution,
        customer_message: message,
    }))
}

/// Вставка тестовых товаров и привязка к ним демонстрационных правил.
///
/// Правила ищутся по коду, поэтому сначала должны быть вставлены правила.
/// Товары с уже существующим SKU пропускаются.
pub async fn insert_test_data(
    catalog: &dyn ProductCatalog,
    rules: &dyn AttributeRuleRepository,
) -> anyhow::Result<usize> {
    let mut inserted = 0;
    for sample in sample_data::sample_products() {
        if catalog.get_by_sku(sample.product.sku()).await?.is_some() {
            continue;
        }
        sample
            .product
            .validate()
            .map_err(ServiceError::Validation)?;
        let product_id = catalog.insert(&sample.product).await?;
        for code in sample.rule_codes {
            match rules.get_by_code(code).await? {
                Some(rule) => {
                    catalog.link_rule(product_id, rule.base.id).await?;
                }
                None => tracing::warn!(
                    "Sample rule {} not found, product {} left without it",
                    code,
                    sample.product.sku()
                ),
            }
        }
        inserted += 1;
    }
    tracing::info!("Inserted {} sample catalog products", inserted);
    Ok(inserted)
}
