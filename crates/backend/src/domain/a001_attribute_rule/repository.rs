use std::collections::HashMap;

use async_trait::async_trait;
use contracts::domain::a001_attribute_rule::aggregate::{AttributeRule, AttributeRuleId};
use contracts::domain::common::AggregateRoot;
use tokio::sync::RwLock;

use crate::shared::error::ServiceError;

/// Хранилище правил (CRUD по идентификатору)
#[async_trait]
pub trait AttributeRuleRepository: Send + Sync {
    /// Все не удалённые правила, отсортированные по коду
    async fn list_all(&self) -> anyhow::Result<Vec<AttributeRule>>;

    /// Правило по ID, включая удалённые
    async fn get_by_id(&self, id: AttributeRuleId) -> anyhow::Result<Option<AttributeRule>>;

    /// Не удалённые правила из списка ID, в порядке списка. Отсутствующие пропускаются.
    async fn get_many(&self, ids: &[AttributeRuleId]) -> anyhow::Result<Vec<AttributeRule>>;

    async fn get_by_code(&self, code: &str) -> anyhow::Result<Option<AttributeRule>>;

    /// Код должен быть свободен среди не удалённых правил, иначе `ServiceError::Validation`
    async fn insert(&self, aggregate: &AttributeRule) -> anyhow::Result<AttributeRuleId>;

    /// Проверка кода та же, что и при вставке
    async fn update(&self, aggregate: &AttributeRule) -> anyhow::Result<()>;

    /// Мягкое удаление. `false`, если правило не найдено или уже удалено.
    async fn soft_delete(&self, id: AttributeRuleId) -> anyhow::Result<bool>;
}

/// Хранилище правил в памяти процесса
#[derive(Default)]
pub struct InMemoryAttributeRuleRepository {
    items: RwLock<HashMap<AttributeRuleId, AttributeRule>>,
}

impl InMemoryAttributeRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Проверка выполняется под блокировкой записи
fn ensure_code_free(
    items: &HashMap<AttributeRuleId, AttributeRule>,
    aggregate: &AttributeRule,
) -> Result<(), ServiceError> {
    let taken = items.values().any(|r| {
        r.base.id != aggregate.base.id && r.is_active_record() && r.base.code == aggregate.base.code
    });
    if taken {
        return Err(ServiceError::Validation(format!(
            "Code {} is already in use",
            aggregate.base.code
        )));
    }
    Ok(())
}

#[async_trait]
impl AttributeRuleRepository for InMemoryAttributeRuleRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<AttributeRule>> {
        let items = self.items.read().await;
        let mut rules: Vec<AttributeRule> = items
            .values()
            .filter(|r| r.is_active_record())
            .cloned()
            .collect();
        rules.sort_by(|a, b| a.base.code.cmp(&b.base.code));
        Ok(rules)
    }

    async fn get_by_id(&self, id: AttributeRuleId) -> anyhow::Result<Option<AttributeRule>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[AttributeRuleId]) -> anyhow::Result<Vec<AttributeRule>> {
        let items = self.items.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| items.get(id))
            .filter(|r| r.is_active_record())
            .cloned()
            .collect())
    }

    async fn get_by_code(&self, code: &str) -> anyhow::Result<Option<AttributeRule>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|r| r.base.code == code && r.is_active_record())
            .cloned())
    }

    async fn insert(&self, aggregate: &AttributeRule) -> anyhow::Result<AttributeRuleId> {
        let mut items = self.items.write().await;
        let id = aggregate.base.id;
        if items.contains_key(&id) {
            anyhow::bail!("{} {} already exists", AttributeRule::full_name(), id.value());
        }
        ensure_code_free(&items, aggregate)?;
        items.insert(id, aggregate.clone());
        Ok(id)
    }

    async fn update(&self, aggregate: &AttributeRule) -> anyhow::Result<()> {
        let mut items = self.items.write().await;
        ensure_code_free(&items, aggregate)?;
        match items.get_mut(&aggregate.base.id) {
            Some(existing) => {
                *existing = aggregate.clone();
                Ok(())
            }
            None => anyhow::bail!(
                "{} {} does not exist",
                AttributeRule::full_name(),
                aggregate.base.id.value()
            ),
        }
    }

    async fn soft_delete(&self, id: AttributeRuleId) -> anyhow::Result<bool> {
        let mut items = self.items.write().await;
        match items.get_mut(&id) {
            Some(rule) if rule.is_active_record() => {
                rule.base.metadata.mark_deleted();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use assert_matches::assert_matches;
    use contracts::domain::a001_attribute_rule::aggregate::RuleCondition;
    use contracts::enums::criterion::Criterion;
    use contracts::enums::rule_action::RuleAction;
    use contracts::enums::rule_kind::RuleKind;

    fn keyword_rule(code: &str) -> AttributeRule {
        AttributeRule::new_for_insert(
            code.into(),
            "Productos con keyword \"usado\"".into(),
            RuleKind::Blocklist,
            Criterion::Keyword,
            RuleAction::Exclude,
            true,
            RuleCondition {
                keyword: Some("usado".into()),
                ..Default::default()
            },
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_code_is_unique_among_active_rules() {
        let repo = InMemoryAttributeRuleRepository::new();
        let first = keyword_rule("RULE-0100");
        repo.insert(&first).await.unwrap();

        let err = repo.insert(&keyword_rule("RULE-0100")).await.unwrap_err();
        assert_matches!(err.downcast_ref::<ServiceError>(), Some(ServiceError::Validation(_)));

        let mut other = keyword_rule("RULE-0101");
        repo.insert(&other).await.unwrap();
        other.base.code = "RULE-0100".into();
        let err = repo.update(&other).await.unwrap_err();
        assert_matches!(err.downcast_ref::<ServiceError>(), Some(ServiceError::Validation(_)));

        // Сохранение правила под собственным кодом
        repo.update(&first).await.unwrap();

        // Код удалённого правила снова свободен
        repo.soft_delete(first.base.id).await.unwrap();
        repo.update(&other).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_inserts_with_same_code() {
        let repo = Arc::new(InMemoryAttributeRuleRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(&keyword_rule("RULE-0200")).await })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
