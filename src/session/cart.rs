use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub unit_price: u64,
    pub quantity: u32,
    pub image: String,
}

impl CartEntry {
    /// Saturates instead of wrapping for absurd catalog prices.
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Items picked during a mission, keyed by product name.
///
/// Entries iterate in name order. There is no per-item removal; the only way
/// to drop an entry is to clear the whole cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of an item. Non-positive quantities are ignored.
    ///
    /// Returns whether the cart changed. The unit price and image recorded on
    /// the first add are kept for later adds of the same name.
    pub fn add(&mut self, name: &str, unit_price: u64, image: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.entries
            .entry(name.to_string())
            .and_modify(|e| e.quantity = e.quantity.saturating_add(quantity))
            .or_insert_with(|| CartEntry {
                unit_price,
                quantity,
                image: image.to_string(),
            });
        true
    }

    pub fn total(&self) -> u64 {
        self.entries
            .values()
            .map(CartEntry::line_total)
            .fold(0, u64::saturating_add)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&CartEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CartEntry)> {
        self.entries.iter()
    }
}
