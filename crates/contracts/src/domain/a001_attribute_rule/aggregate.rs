use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::criterion::Criterion;
use crate::enums::priority_tier::PriorityTier;
use crate::enums::rule_action::RuleAction;
use crate::enums::rule_kind::RuleKind;
use crate::shared::priority::tier_of;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор правила
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttributeRuleId(pub Uuid);

impl AttributeRuleId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for AttributeRuleId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AttributeRuleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Condition
// ============================================================================

/// Что именно выбирает правило. Хранится как описание цели правила,
/// сопоставление с атрибутами товаров здесь не выполняется.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleCondition {
    #[serde(default)]
    pub skus: Vec<String>,

    #[serde(default)]
    pub keyword: Option<String>,

    /// Слова-исключения для Keyword/KeyCat
    #[serde(default, rename = "excludeKeywords")]
    pub exclude_keywords: Vec<String>,

    /// Пути категорий, например "Electrónica > Audio"
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RuleCondition {
    /// Список SKU из текстового поля: по одному на строку, пустые строки пропускаются
    pub fn parse_sku_list(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|sku| !sku.is_empty())
            .map(String::from)
            .collect()
    }

    /// Разбить многострочные элементы `skus` и убрать пустые
    pub fn normalize_skus(&mut self) {
        self.skus = self.skus.iter().flat_map(|s| Self::parse_sku_list(s)).collect();
    }

    fn has_keyword(&self) -> bool {
        self.keyword
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    fn has_categories(&self) -> bool {
        self.categories.iter().any(|c| !c.trim().is_empty())
    }

    /// Проверка соответствия условия критерию
    pub fn validate_for(&self, criterion: Criterion) -> Result<(), String> {
        match criterion {
            Criterion::Sku => {
                if !self.skus.iter().any(|s| !s.trim().is_empty()) {
                    return Err("SKU rule requires at least one SKU".into());
                }
            }
            Criterion::Keyword => {
                if !self.has_keyword() {
                    return Err("Keyword rule requires a keyword".into());
                }
            }
            Criterion::Category => {
                if !self.has_categories() {
                    return Err("Category rule requires at least one category".into());
                }
            }
            Criterion::KeywordCategory => {
                if !self.has_keyword() || !self.has_categories() {
                    return Err("KeyCat rule requires both a keyword and a category".into());
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Правило видимости товаров в каталоге
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRule {
    #[serde(flatten)]
    pub base: BaseAggregate<AttributeRuleId>,

    #[serde(rename = "ruleKind")]
    pub rule_kind: RuleKind,

    pub criterion: Criterion,

    pub action: RuleAction,

    #[serde(rename = "isEnabled")]
    pub is_enabled: bool,

    pub condition: RuleCondition,

    /// Сообщение покупателю для исключённых товаров
    #[serde(rename = "customerMessage")]
    pub customer_message: Option<String>,
}

impl AttributeRule {
    /// Создать новое правило для вставки
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        rule_kind: RuleKind,
        criterion: Criterion,
        action: RuleAction,
        is_enabled: bool,
        condition: RuleCondition,
        customer_message: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(AttributeRuleId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            rule_kind,
            criterion,
            action,
            is_enabled,
            condition,
            customer_message,
        }
    }

    /// Задать даты жизненного цикла (тестовые данные)
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.base.metadata = EntityMetadata::with_timestamps(created_at, updated_at);
        self
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Уровень приоритета по критерию
    pub fn priority(&self) -> PriorityTier {
        tier_of(self.criterion)
    }

    /// Правило включено и не удалено
    pub fn is_applicable(&self) -> bool {
        self.is_enabled && !self.base.metadata.is_deleted
    }

    /// Обновить данные из DTO. Критерий уже разобран вызывающей стороной.
    pub fn update(&mut self, dto: &AttributeRuleDto, criterion: Criterion) {
        if let Some(code) = dto.code.as_ref() {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.rule_kind = dto.rule_kind;
        self.criterion = criterion;
        self.action = dto.action;
        self.is_enabled = dto.is_enabled;
        self.condition = dto.condition.clone();
        self.customer_message = dto.customer_message.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Description must not be empty".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Code must not be empty".into());
        }
        self.condition.validate_for(self.criterion)?;
        if let Some(message) = self.customer_message.as_deref() {
            if self.action == RuleAction::Include && !message.trim().is_empty() {
                return Err("Customer message applies to exclusion rules only".into());
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.condition.normalize_skus();
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// Строка для списка правил
    pub fn to_list_item(&self) -> AttributeRuleListItemDto {
        AttributeRuleListItemDto {
            id: self.to_string_id(),
            code: self.base.code.clone(),
            description: self.base.description.clone(),
            rule_kind: self.rule_kind,
            criterion: self.criterion,
            priority: self.priority(),
            priority_label: self.priority().display_name().to_string(),
            action: self.action,
            status: if self.is_enabled {
                RuleStatus::Active
            } else {
                RuleStatus::Inactive
            },
            created_at: self.base.metadata.created_at.format("%Y-%m-%d").to_string(),
            updated_at: self.base.metadata.updated_at.format("%Y-%m-%d").to_string(),
        }
    }
}

impl AggregateRoot for AttributeRule {
    type Id = AttributeRuleId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "attribute_rule"
    }

    fn element_name() -> &'static str {
        "Regla de atributo"
    }

    fn list_name() -> &'static str {
        "Reglas de atributos"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

fn default_true() -> bool {
    true
}

/// DTO для создания/обновления правила.
///
/// Критерий приходит строкой и разбирается в сервисе: неизвестный код
/// должен вернуться вызывающему как `InvalidCriterion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeRuleDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "ruleKind")]
    pub rule_kind: RuleKind,
    pub criterion: String,
    pub action: RuleAction,
    #[serde(rename = "isEnabled", default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub condition: RuleCondition,
    #[serde(rename = "customerMessage")]
    pub customer_message: Option<String>,
}

/// Статус правила в списке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Active,
    Inactive,
}

/// DTO для списка правил (минимальные поля для list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeRuleListItemDto {
    pub id: String,
    pub code: String,
    pub description: String,
    #[serde(rename = "ruleKind")]
    pub rule_kind: RuleKind,
    pub criterion: Criterion,
    pub priority: PriorityTier,
    /// "Alta" / "Media" / "Baja"
    #[serde(rename = "priorityLabel")]
    pub priority_label: String,
    pub action: RuleAction,
    pub status: RuleStatus,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

// ============================================================================
// List filter
// ============================================================================

/// Фильтр по статусу
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Фильтры страницы управления правилами. `None` означает "все".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleListFilter {
    pub rule_kind: Option<RuleKind>,
    pub status: StatusFilter,
    pub criterion: Option<Criterion>,
    /// Подстрока описания без учёта регистра; пустая строка не фильтрует
    pub search: String,
}

impl RuleListFilter {
    pub fn matches(&self, rule: &AttributeRule) -> bool {
        let kind_ok = self.rule_kind.map_or(true, |k| rule.rule_kind == k);
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => rule.is_enabled,
            StatusFilter::Inactive => !rule.is_enabled,
        };
        let criterion_ok = self.criterion.map_or(true, |c| rule.criterion == c);
        let search = self.search.trim().to_lowercase();
        let search_ok =
            search.is_empty() || rule.base.description.to_lowercase().contains(&search);

        kind_ok && status_ok && criterion_ok && search_ok
    }
}
