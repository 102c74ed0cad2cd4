pub mod cache;
pub mod loader;
pub mod price;

pub use cache::CatalogCache;
pub use loader::{parse_catalog, Catalog};
pub use price::parse_price;
