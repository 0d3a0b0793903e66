use thiserror::Error;

/// Ошибки классификатора приоритетов
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// Код критерия вне допустимого набора (SKU, Keyword, Category, KeyCat)
    #[error("Invalid criterion: {0:?}")]
    InvalidCriterion(String),
}
