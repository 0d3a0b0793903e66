use contracts::system::settings::RulesSettings;

use crate::shared::data::store::Store;
use crate::shared::error::ServiceError;

/// Текущие настройки правил
pub async fn get(store: &Store) -> RulesSettings {
    store.settings().await
}

/// Сохранение настроек. Невалидные настройки не применяются.
pub async fn update(store: &Store, settings: RulesSettings) -> anyhow::Result<RulesSettings> {
    settings.validate().map_err(ServiceError::Validation)?;

    let mut current = store.settings.write().await;
    *current = settings.clone();
    tracing::info!(
        "Rules settings updated: kinds={:?}, tie_break={}",
        settings.enabled_kinds,
        settings.tie_break
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use contracts::enums::rule_kind::RuleKind;
    use contracts::enums::tie_break::TieBreak;

    #[tokio::test]
    async fn test_update_replaces_settings() {
        let store = Store::in_memory(RulesSettings::default());
        let next = RulesSettings {
            enabled_kinds: vec![RuleKind::Regulatory],
            tie_break: TieBreak::FirstCreated,
            ..RulesSettings::default()
        };
        update(&store, next.clone()).await.unwrap();
        assert_eq!(get(&store).await, next);
    }

    #[tokio::test]
    async fn test_invalid_settings_are_rejected() {
        let store = Store::in_memory(RulesSettings::default());
        let invalid = RulesSettings {
            enabled_kinds: vec![],
            ..RulesSettings::default()
        };
        let err = update(&store, invalid).await.unwrap_err();
        assert_matches!(
            err.downcast_ref::<ServiceError>(),
            Some(ServiceError::Validation(_))
        );
        assert_eq!(get(&store).await, RulesSettings::default());
    }
}
