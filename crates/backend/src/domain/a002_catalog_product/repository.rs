use std::collections::HashMap;

use async_trait::async_trait;
use contracts::domain::a001_attribute_rule::aggregate::AttributeRuleId;
use contracts::domain::a002_catalog_product::aggregate::{CatalogProduct, CatalogProductId};
use contracts::domain::common::AggregateRoot;
use tokio::sync::RwLock;

/// Каталог товаров.
///
/// Помимо самих товаров хранит индекс применимых к товару правил:
/// каталог сообщает, какие правила затрагивают товар, а не вычисляет это
/// по условиям правил.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Все не удалённые товары, отсортированные по SKU
    async fn list_all(&self) -> anyhow::Result<Vec<CatalogProduct>>;

    async fn get_by_id(&self, id: CatalogProductId) -> anyhow::Result<Option<CatalogProduct>>;

    async fn get_by_sku(&self, sku: &str) -> anyhow::Result<Option<CatalogProduct>>;

    async fn insert(&self, product: &CatalogProduct) -> anyhow::Result<CatalogProductId>;

    /// ID правил, применимых к товару, в порядке привязки
    async fn applicable_rules(&self, id: CatalogProductId) -> anyhow::Result<Vec<AttributeRuleId>>;

    /// Привязать правило к товару. `false`, если товара нет; повторная привязка не дублируется.
    async fn link_rule(
        &self,
        product_id: CatalogProductId,
        rule_id: AttributeRuleId,
    ) -> anyhow::Result<bool>;
}

#[derive(Default)]
struct CatalogState {
    products: HashMap<CatalogProductId, CatalogProduct>,
    links: HashMap<CatalogProductId, Vec<AttributeRuleId>>,
}

/// Каталог в памяти процесса
#[derive(Default)]
pub struct InMemoryProductCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn list_all(&self) -> anyhow::Result<Vec<CatalogProduct>> {
        let state = self.state.read().await;
        let mut products: Vec<CatalogProduct> = state
            .products
            .values()
            .filter(|p| p.is_active_record())
            .cloned()
            .collect();
        products.sort_by(|a, b| a.base.code.cmp(&b.base.code));
        Ok(products)
    }

    async fn get_by_id(&self, id: CatalogProductId) -> anyhow::Result<Option<CatalogProduct>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn get_by_sku(&self, sku: &str) -> anyhow::Result<Option<CatalogProduct>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .find(|p| p.base.code == sku && p.is_active_record())
            .cloned())
    }

    async fn insert(&self, product: &CatalogProduct) -> anyhow::Result<CatalogProductId> {
        let mut state = self.state.write().await;
        let id = product.base.id;
        if state.products.contains_key(&id) {
            anyhow::bail!("{} {} already exists", CatalogProduct::full_name(), id.value());
        }
        state.products.insert(id, product.clone());
        Ok(id)
    }

    async fn applicable_rules(&self, id: CatalogProductId) -> anyhow::Result<Vec<AttributeRuleId>> {
        let state = self.state.read().await;
        Ok(state.links.get(&id).cloned().unwrap_or_default())
    }

    async fn link_rule(
        &self,
        product_id: CatalogProductId,
        rule_id: AttributeRuleId,
    ) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        if !state.products.contains_key(&product_id) {
            return Ok(false);
        }
        let links = state.links.entry(product_id).or_default();
        if !links.contains(&rule_id) {
            links.push(rule_id);
        }
        Ok(true)
    }
}
