use serde::{Deserialize, Serialize};

use crate::domain::a001_attribute_rule::aggregate::AttributeRule;
use crate::domain::a002_catalog_product::aggregate::ProductSnapshot;
use crate::enums::criterion::Criterion;
use crate::enums::priority_tier::PriorityTier;
use crate::enums::rule_action::RuleAction;
use crate::enums::rule_kind::RuleKind;
use crate::shared::priority::{Resolution, ResolutionBasis};

/// Критичность конфликта: уровень приоритета правила-победителя
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
}

impl ConflictSeverity {
    pub fn from_tier(tier: PriorityTier) -> Self {
        match tier {
            PriorityTier::High => ConflictSeverity::High,
            PriorityTier::Medium => ConflictSeverity::Medium,
            PriorityTier::Low => ConflictSeverity::Low,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConflictSeverity::High => "Crítico",
            ConflictSeverity::Medium => "Medio",
            ConflictSeverity::Low => "Menor",
        }
    }
}

/// Краткое описание правила внутри конфликта
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummaryDto {
    pub id: String,
    pub code: String,
    #[serde(rename = "ruleKind")]
    pub rule_kind: RuleKind,
    pub criterion: Criterion,
    pub priority: PriorityTier,
    pub action: RuleAction,
}

impl From<&AttributeRule> for RuleSummaryDto {
    fn from(rule: &AttributeRule) -> Self {
        Self {
            id: rule.to_string_id(),
            code: rule.base.code.clone(),
            rule_kind: rule.rule_kind,
            criterion: rule.criterion,
            priority: rule.priority(),
            action: rule.action,
        }
    }
}

/// Конфликт правил на одном товаре
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConflictDto {
    pub id: String,
    pub product: ProductSnapshot,
    /// Правило с наибольшим приоритетом (победитель)
    #[serde(rename = "primaryRule")]
    pub primary_rule: RuleSummaryDto,
    #[serde(rename = "conflictingRules")]
    pub conflicting_rules: Vec<RuleSummaryDto>,
    pub resolution: Resolution,
    pub severity: ConflictSeverity,
    /// Бейдж критичности: "Crítico" / "Medio" / "Menor"
    #[serde(rename = "severityLabel")]
    pub severity_label: String,
    /// Текст для оператора, например "Excluido (prevalece regla URSEC por SKU)"
    #[serde(rename = "systemAction")]
    pub system_action: String,
}

/// Счётчики конфликтов по критичности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl ConflictSummary {
    pub fn from_conflicts(conflicts: &[RuleConflictDto]) -> Self {
        conflicts.iter().fold(Self::default(), |mut acc, c| {
            match c.severity {
                ConflictSeverity::High => acc.high += 1,
                ConflictSeverity::Medium => acc.medium += 1,
                ConflictSeverity::Low => acc.low += 1,
            }
            acc.total += 1;
            acc
        })
    }
}

/// Ответ страницы конфликтов
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConflictReportDto {
    pub summary: ConflictSummary,
    pub conflicts: Vec<RuleConflictDto>,
}

/// Текст итогового действия системы
pub fn system_action_text(winner: &AttributeRule, resolution: &Resolution) -> String {
    let outcome = resolution.effective_action.outcome_label();
    match resolution.basis {
        ResolutionBasis::Tier => format!(
            "{} (prevalece regla {} por {})",
            outcome,
            winner.rule_kind.code(),
            winner.criterion.display_name()
        ),
        ResolutionBasis::TieBreak(policy) => format!(
            "{} (prevalece regla {} por {}, desempate: {})",
            outcome,
            winner.rule_kind.code(),
            winner.criterion.display_name(),
            policy.code()
        ),
    }
}
