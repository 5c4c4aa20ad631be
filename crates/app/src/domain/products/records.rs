//! Product Records

use cellar::{
    inventory::StockLevel,
    products::{Category, ProductSnapshot},
};
use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub barcode: String,
    pub category: Category,
    pub price: u64,
    pub stock: u32,
    pub abv: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// What a cart needs to know about this product.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.uuid.into_uuid(),
            name: self.name.clone(),
            barcode: self.barcode.clone(),
            category: self.category,
            price: self.price,
        }
    }

    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel {
            price: self.price,
            stock: self.stock,
        }
    }
}
