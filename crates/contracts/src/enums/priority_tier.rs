use serde::{Deserialize, Serialize};

/// Уровень приоритета критерия.
///
/// Порядок вариантов задаёт порядок сравнения: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

impl PriorityTier {
    pub fn code(&self) -> &'static str {
        match self {
            PriorityTier::Low => "low",
            PriorityTier::Medium => "medium",
            PriorityTier::High => "high",
        }
    }

    /// Метка для UI (бейдж приоритета)
    pub fn display_name(&self) -> &'static str {
        match self {
            PriorityTier::Low => "Baja",
            PriorityTier::Medium => "Media",
            PriorityTier::High => "Alta",
        }
    }

    /// От высшего к низшему
    pub fn all() -> Vec<PriorityTier> {
        vec![PriorityTier::High, PriorityTier::Medium, PriorityTier::Low]
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
