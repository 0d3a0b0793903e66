pub mod aggregate;

pub use aggregate::{CatalogProduct, CatalogProductDetailsDto, CatalogProductId, ProductSnapshot};
