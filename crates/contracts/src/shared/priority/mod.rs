//! Приоритеты критериев и разрешение конфликтов между правилами.
//!
//! Иерархия: SKU > Keyword = KeyCat > Categoría.

pub mod classifier;
pub mod error;
pub mod resolution;

pub use classifier::{resolve, resolve_all, tier_of, tier_of_code};
pub use error::ClassifierError;
pub use resolution::{Resolution, ResolutionBasis};
