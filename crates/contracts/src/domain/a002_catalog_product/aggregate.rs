use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_attribute_rule::aggregate::AttributeRuleListItemDto;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::priority::Resolution;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogProductId(pub Uuid);

impl CatalogProductId {
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

impl AggregateId for CatalogProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CatalogProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар каталога. `code` — SKU, `description` — название.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub base: BaseAggregate<CatalogProductId>,

    /// Путь категории, например "Electrónica > Audio > Auriculares"
    #[serde(rename = "categoryPath")]
    pub category_path: String,

    pub keywords: Vec<String>,
}

impl CatalogProduct {
    pub fn new_for_insert(
        sku: String,
        name: String,
        category_path: String,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(CatalogProductId::new_v4(), sku, name),
            category_path,
            keywords,
        }
    }

    pub fn sku(&self) -> &str {
        &self.base.code
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Сегменты пути категории без пробелов по краям
    pub fn category_segments(&self) -> Vec<&str> {
        self.category_path
            .split('>')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("SKU must not be empty".into());
        }
        if self.base.description.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        if self.category_segments().is_empty() {
            return Err("Category path must not be empty".into());
        }
        Ok(())
    }

    /// Краткая копия для отчётов
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.base.id.as_string(),
            name: self.base.description.clone(),
            sku: self.base.code.clone(),
            category: self.category_path.clone(),
        }
    }
}

impl AggregateRoot for CatalogProduct {
    type Id = CatalogProductId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "catalog_product"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Productos"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Товар в отчёте о конфликте
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
}

/// Карточка товара с применимыми к нему правилами
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProductDetailsDto {
    pub product: CatalogProduct,
    #[serde(rename = "applicableRules")]
    pub applicable_rules: Vec<AttributeRuleListItemDto>,
    /// Итог по действующим правилам; `None`, если ни одно не действует
    pub resolution: Option<Resolution>,
    /// Что видит покупатель, если товар исключён
    #[serde(rename = "customerMessage")]
    pub customer_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_segments() {
        let product = CatalogProduct::new_for_insert(
            "SONY-WH1000XM4".into(),
            "Auricular Bluetooth Sony WH-1000XM4".into(),
            "Electrónica >Audio >  Auriculares".into(),
            vec!["bluetooth".into()],
        );
        assert_eq!(product.category_segments(), vec!["Electrónica", "Audio", "Auriculares"]);
        assert!(product.validate().is_ok());
        assert_eq!(product.snapshot().sku, "SONY-WH1000XM4");
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let product =
            CatalogProduct::new_for_insert("SKU-1".into(), "Producto".into(), " > ".into(), vec![]);
        assert!(product.validate().is_err());
    }
}
