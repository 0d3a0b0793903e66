pub mod a001_attribute_rule;
pub mod a002_catalog_product;
