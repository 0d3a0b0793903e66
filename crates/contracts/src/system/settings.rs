use serde::{Deserialize, Serialize};

use crate::enums::rule_kind::RuleKind;
use crate::enums::tie_break::TieBreak;

pub const DEFAULT_BLOCKED_PRODUCT_MESSAGE: &str = "Este producto no está disponible en este momento. \
Para más información, contacte con servicio al cliente.";

/// Частота пересчёта правил (информационная настройка)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationFrequency {
    #[default]
    Realtime,
    Hourly,
    Daily,
    Weekly,
}

/// Настройки правил
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesSettings {
    /// Типы правил, участвующие в расчёте конфликтов
    #[serde(rename = "enabledKinds")]
    pub enabled_kinds: Vec<RuleKind>,

    #[serde(rename = "tieBreak", default)]
    pub tie_break: TieBreak,

    #[serde(rename = "blockedProductMessage")]
    pub blocked_product_message: String,

    #[serde(rename = "evaluationFrequency", default)]
    pub evaluation_frequency: EvaluationFrequency,
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            enabled_kinds: RuleKind::all(),
            tie_break: TieBreak::default(),
            blocked_product_message: DEFAULT_BLOCKED_PRODUCT_MESSAGE.to_string(),
            evaluation_frequency: EvaluationFrequency::default(),
        }
    }
}

impl RulesSettings {
    pub fn is_kind_enabled(&self, kind: RuleKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.enabled_kinds.is_empty() {
            return Err("At least one rule kind must stay enabled".into());
        }
        if self.blocked_product_message.trim().is_empty() {
            return Err("Blocked product message must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_every_kind() {
        let settings = RulesSettings::default();
        assert!(settings.validate().is_ok());
        for kind in RuleKind::all() {
            assert!(settings.is_kind_enabled(kind));
        }
        assert_eq!(settings.tie_break, TieBreak::MostRecentlyUpdated);
    }

    #[test]
    fn test_validate() {
        let settings = RulesSettings {
            enabled_kinds: vec![],
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = RulesSettings {
            blocked_product_message: " ".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"enabledKinds":["URSEC"],"blockedProductMessage":"No disponible"}"#;
        let settings: RulesSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.enabled_kinds, vec![RuleKind::Regulatory]);
        assert_eq!(settings.tie_break, TieBreak::MostRecentlyUpdated);
        assert_eq!(settings.evaluation_frequency, EvaluationFrequency::Realtime);
    }
}
