use serde::{Deserialize, Serialize};

use crate::domain::a001_attribute_rule::aggregate::AttributeRuleId;
use crate::enums::priority_tier::PriorityTier;
use crate::enums::rule_action::RuleAction;
use crate::enums::tie_break::TieBreak;

/// На каком основании выбрано правило-победитель
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "policy", rename_all = "snake_case")]
pub enum ResolutionBasis {
    /// Уровень приоритета победителя строго выше остальных
    Tier,
    /// Уровни совпали, решение принято политикой
    TieBreak(TieBreak),
}

/// Результат разрешения конфликта для одного товара
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(rename = "winningRuleId")]
    pub winning_rule_id: AttributeRuleId,

    /// Итоговое действие для товара (действие победителя)
    #[serde(rename = "effectiveAction")]
    pub effective_action: RuleAction,

    #[serde(rename = "winningTier")]
    pub winning_tier: PriorityTier,

    /// Проигравшие правила, в порядке поступления (для аудита)
    #[serde(rename = "losingRuleIds")]
    pub losing_rule_ids: Vec<AttributeRuleId>,

    pub basis: ResolutionBasis,
}

impl Resolution {
    pub fn decided_by_tier(&self) -> bool {
        self.basis == ResolutionBasis::Tier
    }
}
