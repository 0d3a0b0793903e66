use std::sync::Arc;

use contracts::system::settings::RulesSettings;
use tokio::sync::RwLock;

use crate::domain::a001_attribute_rule::repository::{
    AttributeRuleRepository, InMemoryAttributeRuleRepository,
};
use crate::domain::a002_catalog_product::repository::{InMemoryProductCatalog, ProductCatalog};

/// Хранилища приложения. Передаётся в обработчики через `State`.
pub struct Store {
    pub rules: Arc<dyn AttributeRuleRepository>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub settings: RwLock<RulesSettings>,
}

impl Store {
    pub fn new(
        rules: Arc<dyn AttributeRuleRepository>,
        catalog: Arc<dyn ProductCatalog>,
        settings: RulesSettings,
    ) -> Self {
        Self {
            rules,
            catalog,
            settings: RwLock::new(settings),
        }
    }

    /// Хранилища в памяти процесса
    pub fn in_memory(settings: RulesSettings) -> Self {
        Self::new(
            Arc::new(InMemoryAttributeRuleRepository::new()),
            Arc::new(InMemoryProductCatalog::new()),
            settings,
        )
    }

    /// Снимок текущих настроек
    pub async fn settings(&self) -> RulesSettings {
        self.settings.read().await.clone()
    }
}

pub type SharedStore = Arc<Store>;
