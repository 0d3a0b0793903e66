use serde::{Deserialize, Serialize};

/// Действие правила над товаром
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleAction {
    #[serde(rename = "Incluir")]
    Include,
    #[serde(rename = "Excluir")]
    Exclude,
}

impl RuleAction {
    pub fn code(&self) -> &'static str {
        match self {
            RuleAction::Include => "Incluir",
            RuleAction::Exclude => "Excluir",
        }
    }

    /// Итоговое состояние товара после применения действия
    pub fn outcome_label(&self) -> &'static str {
        match self {
            RuleAction::Include => "Incluido",
            RuleAction::Exclude => "Excluido",
        }
    }
}

impl std::fmt::Display for RuleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
