//! Sales

use serde::{Deserialize, Serialize};

/// Aggregate figures over a set of recorded sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Sum of sale totals in minor units, saturating at `u64::MAX`
    pub total_revenue: u64,

    /// Number of sales
    pub transaction_count: usize,
}

impl SalesSummary {
    /// Summarise sale totals.
    pub fn from_totals(totals: impl IntoIterator<Item = u64>) -> Self {
        totals
            .into_iter()
            .fold(Self::default(), |summary, total| Self {
                total_revenue: summary.total_revenue.saturating_add(total),
                transaction_count: summary.transaction_count + 1,
            })
    }
}
