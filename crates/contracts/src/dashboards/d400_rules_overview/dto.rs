use serde::{Deserialize, Serialize};

use crate::enums::priority_tier::PriorityTier;
use crate::enums::rule_kind::RuleKind;

/// Количество правил одного типа (для круговой диаграммы)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleKindCount {
    #[serde(rename = "ruleKind")]
    pub rule_kind: RuleKind,
    pub value: usize,
}

/// Количество правил одного уровня приоритета
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTierCount {
    pub tier: PriorityTier,
    pub value: usize,
}

/// Response for rules overview dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesOverviewResponse {
    /// Rules that are not deleted
    #[serde(rename = "totalRules")]
    pub total_rules: usize,
    #[serde(rename = "activeRules")]
    pub active_rules: usize,
    #[serde(rename = "rulesByKind")]
    pub rules_by_kind: Vec<RuleKindCount>,
    #[serde(rename = "rulesByTier")]
    pub rules_by_tier: Vec<PriorityTierCount>,
    #[serde(rename = "conflictsDetected")]
    pub conflicts_detected: usize,
    /// Products with at least one applicable enabled rule
    #[serde(rename = "productsAffected")]
    pub products_affected: usize,
    /// Products whose effective action is exclusion
    #[serde(rename = "productsExcluded")]
    pub products_excluded: usize,
    #[serde(rename = "totalProducts")]
    pub total_products: usize,
}
