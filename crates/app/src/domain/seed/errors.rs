//! Seeding errors.

use thiserror::Error;

use crate::domain::products::ProductsServiceError;

/// Why a single sample product could not be seeded.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to look up barcode")]
    Lookup(#[source] ProductsServiceError),

    #[error("failed to create product")]
    Create(#[source] ProductsServiceError),
}
