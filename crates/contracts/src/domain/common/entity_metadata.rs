use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Мягкое удаление (soft delete)
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    /// Версия для optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        Self::with_timestamps(Utc::now(), Utc::now())
    }

    /// Метаданные с заданными датами (тестовые данные, импорт)
    pub fn with_timestamps(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
            is_deleted: false,
            version: 0,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Увеличить версию
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Пометить запись удалённой
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.touch();
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
