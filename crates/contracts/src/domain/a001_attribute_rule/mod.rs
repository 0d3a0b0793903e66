//! Attribute Rule Domain Module
//!
//! Правила включения/исключения товаров из каталога по SKU, keyword,
//! категории или их комбинации.

pub mod aggregate;

pub use aggregate::{
    AttributeRule, AttributeRuleDto, AttributeRuleId, AttributeRuleListItemDto, RuleCondition,
    RuleListFilter, RuleStatus, StatusFilter,
};
