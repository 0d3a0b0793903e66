use std::cmp::Reverse;

use anyhow::Result;
use contracts::domain::a001_attribute_rule::aggregate::AttributeRule;
use contracts::domain::a002_catalog_product::aggregate::CatalogProduct;
use contracts::projections::p900_rule_conflicts::dto::{
    system_action_text, ConflictSeverity, ConflictSummary, RuleConflictDto,
    RuleConflictReportDto, RuleSummaryDto,
};
use contracts::shared::priority::{self, Resolution};

use crate::domain::a002_catalog_product::service as catalog_service;
use crate::shared::data::store::Store;

/// Итог применения правил к одному товару
#[derive(Debug, Clone)]
pub struct ProductOutcome {
    pub product: CatalogProduct,
    /// Включённые правила включённых типов, в порядке привязки
    pub rules: Vec<AttributeRule>,
    /// `None`, если ни одно правило не действует
    pub resolution: Option<Resolution>,
}

impl ProductOutcome {
    /// Правила расходятся в действии
    pub fn is_conflict(&self) -> bool {
        match self.rules.split_first() {
            Some((first, rest)) => rest.iter().any(|r| r.action != first.action),
            None => false,
        }
    }
}

/// Итоги по всем не удалённым товарам каталога
pub async fn product_outcomes(store: &Store) -> Result<Vec<ProductOutcome>> {
    let settings = store.settings().await;
    let products = store.catalog.list_all().await?;

    let mut outcomes = Vec::with_capacity(products.len());
    for product in products {
        let rules: Vec<AttributeRule> = catalog_service::applicable_rules(
            store.catalog.as_ref(),
            store.rules.as_ref(),
            product.base.id,
        )
        .await?
        .into_iter()
        .filter(|r| catalog_service::is_effective(r, &settings))
        .collect();

        let refs: Vec<&AttributeRule> = rules.iter().collect();
        let resolution = priority::resolve_all(&refs, settings.tie_break);
        outcomes.push(ProductOutcome {
            product,
            rules,
            resolution,
        });
    }
    Ok(outcomes)
}

/// Конфликты правил: товары, на которые действуют правила с разными действиями.
///
/// Сортировка: сначала высокая критичность, затем код товара.
pub async fn detect_conflicts(store: &Store) -> Result<Vec<RuleConflictDto>> {
    let mut conflicts: Vec<RuleConflictDto> = product_outcomes(store)
        .await?
        .iter()
        .filter(|o| o.is_conflict())
        .filter_map(to_conflict)
        .collect();

    conflicts.sort_by(|a, b| {
        Reverse(a.severity)
            .cmp(&Reverse(b.severity))
            .then_with(|| a.product.sku.cmp(&b.product.sku))
    });
    tracing::debug!("Detected {} rule conflicts", conflicts.len());
    Ok(conflicts)
}

fn to_conflict(outcome: &ProductOutcome) -> Option<RuleConflictDto> {
    let resolution = outcome.resolution.clone()?;
    let winner = outcome
        .rules
        .iter()
        .find(|r| r.base.id == resolution.winning_rule_id)?;

    let severity = ConflictSeverity::from_tier(resolution.winning_tier);
    Some(RuleConflictDto {
        id: format!("conflict-{}", outcome.product.base.id.value()),
        product: outcome.product.snapshot(),
        primary_rule: RuleSummaryDto::from(winner),
        conflicting_rules: outcome
            .rules
            .iter()
            .filter(|r| r.base.id != winner.base.id)
            .map(RuleSummaryDto::from)
            .collect(),
        severity,
        severity_label: severity.display_name().to_string(),
        system_action: system_action_text(winner, &resolution),
        resolution,
    })
}

/// Страница конфликтов: счётчики и список
pub async fn report(store: &Store) -> Result<RuleConflictReportDto> {
    let conflicts = detect_conflicts(store).await?;
    Ok(RuleConflictReportDto {
        summary: ConflictSummary::from_conflicts(&conflicts),
        conflicts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::rule_action::RuleAction;
    use contracts::enums::rule_kind::RuleKind;
    use contracts::enums::tie_break::TieBreak;
    use contracts::shared::priority::ResolutionBasis;
    use contracts::system::settings::RulesSettings;

    use crate::domain::{a001_attribute_rule, a002_catalog_product};

    async fn seeded(settings: RulesSettings) -> Store {
        let store = Store::in_memory(settings);
        a001_attribute_rule::service::insert_test_data(store.rules.as_ref())
            .await
            .unwrap();
        a002_catalog_product::service::insert_test_data(store.catalog.as_ref(), store.rules.as_ref())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_sample_conflicts() {
        let store = seeded(RulesSettings::default()).await;
        let report = report(&store).await.unwrap();

        let skus: Vec<&str> = report.conflicts.iter().map(|c| c.product.sku.as_str()).collect();
        assert_eq!(
            skus,
            vec!["SONY-WH1000XM4", "APPLE-MACBOOK-PRO", "JBL-BTH-001", "SAM-GALAXY-S21"]
        );
        assert_eq!(
            report.summary,
            ConflictSummary {
                high: 1,
                medium: 3,
                low: 0,
                total: 4
            }
        );

        let sony = &report.conflicts[0];
        assert_eq!(sony.severity, ConflictSeverity::High);
        assert_eq!(sony.severity_label, "Crítico");
        assert_eq!(sony.primary_rule.code, "RULE-0001");
        assert_eq!(sony.resolution.effective_action, RuleAction::Exclude);
        assert_eq!(sony.system_action, "Excluido (prevalece regla URSEC por SKU)");
        assert_eq!(sony.conflicting_rules.len(), 1);
        assert_eq!(sony.conflicting_rules[0].code, "RULE-0003");

        let apple = &report.conflicts[1];
        assert_eq!(apple.primary_rule.code, "RULE-0008");
        assert_eq!(apple.resolution.effective_action, RuleAction::Exclude);
    }

    #[tokio::test]
    async fn test_same_tier_conflict_uses_tie_break() {
        let store = seeded(RulesSettings::default()).await;
        let conflicts = detect_conflicts(&store).await.unwrap();
        let jbl = conflicts
            .iter()
            .find(|c| c.product.sku == "JBL-BTH-001")
            .unwrap();

        assert_eq!(jbl.primary_rule.code, "RULE-0009");
        assert_eq!(jbl.resolution.effective_action, RuleAction::Include);
        assert_eq!(
            jbl.resolution.basis,
            ResolutionBasis::TieBreak(TieBreak::MostRecentlyUpdated)
        );
        assert_eq!(jbl.conflicting_rules.len(), 2);

        let store = seeded(RulesSettings {
            tie_break: TieBreak::FirstCreated,
            ..RulesSettings::default()
        })
        .await;
        let conflicts = detect_conflicts(&store).await.unwrap();
        let jbl = conflicts
            .iter()
            .find(|c| c.product.sku == "JBL-BTH-001")
            .unwrap();
        assert_eq!(jbl.primary_rule.code, "RULE-0002");
        assert_eq!(jbl.resolution.effective_action, RuleAction::Exclude);
    }

    #[tokio::test]
    async fn test_disabled_kind_is_ignored() {
        let store = seeded(RulesSettings {
            enabled_kinds: vec![RuleKind::Regulatory, RuleKind::Allowlist],
            ..RulesSettings::default()
        })
        .await;
        let conflicts = detect_conflicts(&store).await.unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].product.sku, "SONY-WH1000XM4");
    }

    #[tokio::test]
    async fn test_outcomes_without_conflict() {
        let store = seeded(RulesSettings::default()).await;
        let outcomes = product_outcomes(&store).await.unwrap();
        assert_eq!(outcomes.len(), 7);

        let bose = outcomes
            .iter()
            .find(|o| o.product.sku() == "BOSE-BTH-001")
            .unwrap();
        assert!(!bose.is_conflict());
        assert_eq!(
            bose.resolution.as_ref().map(|r| r.effective_action),
            Some(RuleAction::Include)
        );

        // RULE-0004 выключено
        let tv = outcomes
            .iter()
            .find(|o| o.product.sku() == "SAM-TV-001")
            .unwrap();
        assert!(tv.rules.is_empty());
        assert!(tv.resolution.is_none());
    }

    #[tokio::test]
    async fn test_empty_store_has_no_conflicts() {
        let store = Store::in_memory(RulesSettings::default());
        let report = report(&store).await.unwrap();
        assert!(report.conflicts.is_empty());
        assert_eq!(report.summary.total, 0);
    }
}
