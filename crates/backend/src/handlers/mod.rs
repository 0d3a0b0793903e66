pub mod a001_attribute_rule;
pub mod a002_catalog_product;
pub mod d400_rules_overview;
pub mod p900_rule_conflicts;
pub mod settings;
