use anyhow::Result;
use contracts::dashboards::d400_rules_overview::dto::{
    PriorityTierCount, RuleKindCount, RulesOverviewResponse,
};
use contracts::enums::priority_tier::PriorityTier;
use contracts::enums::rule_action::RuleAction;
use contracts::enums::rule_kind::RuleKind;

use crate::projections::p900_rule_conflicts::service as conflicts;
use crate::shared::data::store::Store;

/// Get rules overview counters
pub async fn get_rules_overview(store: &Store) -> Result<RulesOverviewResponse> {
    let rules = store.rules.list_all().await?;
    let outcomes = conflicts::product_outcomes(store).await?;

    // === RULES ===
    let rules_by_kind = RuleKind::all()
        .into_iter()
        .map(|kind| RuleKindCount {
            rule_kind: kind,
            value: rules.iter().filter(|r| r.rule_kind == kind).count(),
        })
        .collect();
    let rules_by_tier = PriorityTier::all()
        .into_iter()
        .map(|tier| PriorityTierCount {
            tier,
            value: rules.iter().filter(|r| r.priority() == tier).count(),
        })
        .collect();

    // === PRODUCTS ===
    let products_affected = outcomes.iter().filter(|o| o.resolution.is_some()).count();
    let products_excluded = outcomes
        .iter()
        .filter_map(|o| o.resolution.as_ref())
        .filter(|r| r.effective_action == RuleAction::Exclude)
        .count();

    Ok(RulesOverviewResponse {
        total_rules: rules.len(),
        active_rules: rules.iter().filter(|r| r.is_enabled).count(),
        rules_by_kind,
        rules_by_tier,
        conflicts_detected: outcomes.iter().filter(|o| o.is_conflict()).count(),
        products_affected,
        products_excluded,
        total_products: outcomes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::settings::RulesSettings;

    use crate::domain::{a001_attribute_rule, a002_catalog_product};

    #[tokio::test]
    async fn test_overview_over_sample_data() {
        let store = Store::in_memory(RulesSettings::default());
        a001_attribute_rule::service::insert_test_data(store.rules.as_ref())
            .await
            .unwrap();
        a002_catalog_product::service::insert_test_data(store.catalog.as_ref(), store.rules.as_ref())
            .await
            .unwrap();

        let overview = get_rules_overview(&store).await.unwrap();
        assert_eq!(overview.total_rules, 9);
        assert_eq!(overview.active_rules, 8);
        assert!(overview.rules_by_kind.iter().all(|c| c.value == 3));

        let tiers: Vec<(PriorityTier, usize)> = overview
            .rules_by_tier
            .iter()
            .map(|c| (c.tier, c.value))
            .collect();
        assert_eq!(
            tiers,
            vec![
                (PriorityTier::High, 1),
                (PriorityTier::Medium, 4),
                (PriorityTier::Low, 4)
            ]
        );

        assert_eq!(overview.conflicts_detected, 4);
        assert_eq!(overview.products_affected, 5);
        assert_eq!(overview.products_excluded, 3);
        assert_eq!(overview.total_products, 7);
    }

    #[tokio::test]
    async fn test_overview_of_empty_store() {
        let store = Store::in_memory(RulesSettings::default());
        let overview = get_rules_overview(&store).await.unwrap();
        assert_eq!(overview.total_rules, 0);
        assert_eq!(overview.conflicts_detected, 0);
        assert_eq!(overview.rules_by_kind.len(), 3);
    }
}
