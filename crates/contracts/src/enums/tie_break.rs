use serde::{Deserialize, Serialize};

/// Политика разрешения конфликта между правилами одного уровня приоритета
/// (например, Keyword против KeyCat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Побеждает правило с более поздним `updated_at`
    #[default]
    MostRecentlyUpdated,
    /// Побеждает правило с более ранним `created_at`
    FirstCreated,
}

impl TieBreak {
    pub fn code(&self) -> &'static str {
        match self {
            TieBreak::MostRecentlyUpdated => "most_recently_updated",
            TieBreak::FirstCreated => "first_created",
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
