pub mod types;

pub use types::ShopError;
