//! Product Index Handler

use std::sync::Arc;

use cellar::products::{CatalogFilter, parse_category_filter};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products ordered by name
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Lists the catalog, optionally filtered by category (`all` for every
/// category) and by a search term matched against name and barcode.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = category.into_inner();

    let filter = CatalogFilter {
        category: parse_category_filter(category.as_deref()).or_400("invalid category")?,
        search: q.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
