use serde::{Deserialize, Serialize};

/// A catalog item. Prices are whole won; there is no fractional currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: u64,
    /// URL or local path of the product picture.
    pub image: String,
}
