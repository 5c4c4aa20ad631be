//! Inventory Summary Handler

use std::sync::Arc;

use cellar::inventory::{InventorySummary, LOW_STOCK_THRESHOLD};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InventorySummaryResponse {
    pub total_products: usize,

    /// Products with fewer units on hand than `lowStockThreshold`
    pub low_stock_items: usize,

    pub low_stock_threshold: u32,

    /// Sum of price x stock, in cents
    pub inventory_value: u64,
}

impl From<InventorySummary> for InventorySummaryResponse {
    fn from(summary: InventorySummary) -> Self {
        Self {
            total_products: summary.total_products,
            low_stock_items: summary.low_stock_items,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            inventory_value: summary.inventory_value,
        }
    }
}

/// Inventory Summary Handler
#[endpoint(
    tags("products"),
    summary = "Inventory Summary",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<InventorySummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.current_user_or_401()?;

    let summary = state
        .app
        .products
        .inventory_summary()
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
