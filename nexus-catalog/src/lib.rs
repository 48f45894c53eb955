pub mod catalog;
pub mod seed;

pub use catalog::{Catalog, CatalogError};
pub use seed::seed_games;
