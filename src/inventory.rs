//! Inventory

use serde::{Deserialize, Serialize};

/// Products with fewer units than this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock figures for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    /// Unit price in minor currency units
    pub price: u64,

    /// Units on hand
    pub stock: u32,
}

/// Inventory overview shown on the stock management screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Number of catalog products
    pub total_products: usize,

    /// Products below [`LOW_STOCK_THRESHOLD`]
    pub low_stock_items: usize,

    /// Sum of price x stock, saturating at `u64::MAX`
    pub inventory_value: u64,
}

impl InventorySummary {
    /// Summarise a set of stock levels.
    pub fn from_levels(levels: impl IntoIterator<Item = StockLevel>) -> Self {
        levels
            .into_iter()
            .fold(Self::default(), |mut summary, level| {
                summary.total_products += 1;

                if level.stock < LOW_STOCK_THRESHOLD {
                    summary.low_stock_items += 1;
                }

                summary.inventory_value = summary
                    .inventory_value
                    .saturating_add(level.price.saturating_mul(u64::from(level.stock)));

                summary
            })
    }
}
