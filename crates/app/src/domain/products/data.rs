//! Products Data

use cellar::products::Category;
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

/// Highest accepted alcohol by volume percentage.
pub const MAX_ABV: f64 = 100.0;

/// Reasons a new product is rejected before it reaches storage.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProductValidationError {
    #[error("product name is required")]
    MissingName,

    #[error("barcode is required")]
    MissingBarcode,

    #[error("abv must be between 0 and 100")]
    AbvOutOfRange,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub barcode: String,
    pub category: Category,
    pub price: u64,
    pub stock: u32,
    pub abv: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Trim text fields, drop blank optional text and check required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductValidationError`] for a blank name or barcode, or an
    /// ABV outside `0..=100`.
    pub fn normalized(self) -> Result<Self, ProductValidationError> {
        let name = self.name.trim().to_string();
        let barcode = self.barcode.trim().to_string();

        if name.is_empty() {
            return Err(ProductValidationError::MissingName);
        }

        if barcode.is_empty() {
            return Err(ProductValidationError::MissingBarcode);
        }

        if let Some(abv) = self.abv
            && !(0.0..=MAX_ABV).contains(&abv)
        {
            return Err(ProductValidationError::AbvOutOfRange);
        }

        Ok(Self {
            name,
            barcode,
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
            ..self
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
