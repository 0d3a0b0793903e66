use serde::{Deserialize, Serialize};

use crate::shared::priority::ClassifierError;

/// Критерий, по которому правило выбирает товары
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    #[serde(rename = "SKU")]
    Sku,
    #[serde(rename = "Keyword")]
    Keyword,
    #[serde(rename = "Category", alias = "Categoría")]
    Category,
    /// Keyword и категория одновременно ("KeyCat")
    #[serde(rename = "KeyCat")]
    KeywordCategory,
}

impl Criterion {
    /// Получить код критерия
    pub fn code(&self) -> &'static str {
        match self {
            Criterion::Sku => "SKU",
            Criterion::Keyword => "Keyword",
            Criterion::Category => "Category",
            Criterion::KeywordCategory => "KeyCat",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            Criterion::Sku => "SKU",
            Criterion::Keyword => "Keyword",
            Criterion::Category => "Categoría",
            Criterion::KeywordCategory => "KeyCat",
        }
    }

    /// Получить все критерии
    pub fn all() -> Vec<Criterion> {
        vec![
            Criterion::Sku,
            Criterion::Keyword,
            Criterion::Category,
            Criterion::KeywordCategory,
        ]
    }

    /// Парсинг из строки. Неизвестный код — `InvalidCriterion`
    pub fn from_code(code: &str) -> Result<Self, ClassifierError> {
        match code.trim() {
            "SKU" => Ok(Criterion::Sku),
            "Keyword" => Ok(Criterion::Keyword),
            "Category" | "Categoría" => Ok(Criterion::Category),
            "KeyCat" => Ok(Criterion::KeywordCategory),
            other => Err(ClassifierError::InvalidCriterion(other.to_string())),
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_code_accepts_legacy_category() {
        assert_eq!(Criterion::from_code("Categoría").unwrap(), Criterion::Category);
        assert_eq!(Criterion::from_code("Category").unwrap(), Criterion::Category);
        assert_eq!(Criterion::from_code(" KeyCat ").unwrap(), Criterion::KeywordCategory);
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_matches!(
            Criterion::from_code("Brand"),
            Err(ClassifierError::InvalidCriterion(code)) if code == "Brand"
        );
        assert_matches!(Criterion::from_code(""), Err(ClassifierError::InvalidCriterion(_)));
    }

    #[test]
    fn test_codes_are_stable_on_the_wire() {
        for criterion in Criterion::all() {
            assert_eq!(Criterion::from_code(criterion.code()).unwrap(), criterion);
        }
        let json = serde_json::to_string(&Criterion::KeywordCategory).unwrap();
        assert_eq!(json, "\"KeyCat\"");
        let parsed: Criterion = serde_json::from_str("\"Categoría\"").unwrap();
        assert_eq!(parsed, Criterion::Category);
    }
}
