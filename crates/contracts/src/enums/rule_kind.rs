use serde::{Deserialize, Serialize};

/// Тип правила (источник политики)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Регуляторное правило (URSEC)
    #[serde(rename = "URSEC")]
    Regulatory,
    #[serde(rename = "Blacklist")]
    Blocklist,
    #[serde(rename = "Whitelist")]
    Allowlist,
}

impl RuleKind {
    /// Получить код типа
    pub fn code(&self) -> &'static str {
        match self {
            RuleKind::Regulatory => "URSEC",
            RuleKind::Blocklist => "Blacklist",
            RuleKind::Allowlist => "Whitelist",
        }
    }

    pub fn all() -> Vec<RuleKind> {
        vec![RuleKind::Regulatory, RuleKind::Blocklist, RuleKind::Allowlist]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "URSEC" => Some(RuleKind::Regulatory),
            "Blacklist" => Some(RuleKind::Blocklist),
            "Whitelist" => Some(RuleKind::Allowlist),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
