//! Sample catalog.

use cellar::products::Category;

use crate::domain::products::{data::NewProduct, records::ProductUuid};

/// A product shipped with the seeder. Prices are whole shillings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleProduct {
    pub name: &'static str,
    pub barcode: &'static str,
    pub category: Category,
    pub shillings: u64,
    pub stock: u32,
    pub abv: f64,
}

impl SampleProduct {
    const fn new(
        name: &'static str,
        barcode: &'static str,
        category: Category,
        shillings: u64,
        stock: u32,
        abv: f64,
    ) -> Self {
        Self {
            name,
            barcode,
            category,
            shillings,
            stock,
            abv,
        }
    }

    /// Price in cents.
    #[must_use]
    pub const fn price(&self) -> u64 {
        self.shillings * 100
    }

    #[must_use]
    pub fn new_product(&self) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: self.name.to_string(),
            barcode: self.barcode.to_string(),
            category: self.category,
            price: self.price(),
            stock: self.stock,
            abv: Some(self.abv),
            description: None,
            image_url: None,
        }
    }
}

/// Products inserted by `catalog seed`.
pub const SAMPLE_PRODUCTS: [SampleProduct; 14] = [
    SampleProduct::new("Tusker Lager 500ml", "1234567890001", Category::Beer, 250, 120, 4.2),
    SampleProduct::new("White Cap 500ml", "1234567890002", Category::Beer, 230, 90, 4.0),
    SampleProduct::new("Pilsner 500ml", "1234567890003", Category::Beer, 200, 150, 4.5),
    SampleProduct::new("Guinness 500ml", "1234567890004", Category::Beer, 280, 80, 7.5),
    SampleProduct::new("Heineken 330ml", "1234567890005", Category::Beer, 300, 60, 5.0),
    SampleProduct::new(
        "4th Street Sweet Red 750ml",
        "1234567890006",
        Category::Wine,
        450,
        50,
        7.0,
    ),
    SampleProduct::new(
        "Drostdy-Hof Cabernet 750ml",
        "1234567890007",
        Category::Wine,
        520,
        29,
        13.5,
    ),
    SampleProduct::new(
        "Nederburg Sauvignon Blanc",
        "1234567890008",
        Category::Wine,
        680,
        24,
        12.5,
    ),
    SampleProduct::new("Jambo Wine Red 750ml", "1234567890009", Category::Wine, 380, 44, 12.0),
    SampleProduct::new(
        "Smirnoff Vodka 750ml",
        "1234567890010",
        Category::Spirits,
        1200,
        35,
        40.0,
    ),
    SampleProduct::new(
        "Johnnie Walker Red Label 750ml",
        "1234567890011",
        Category::Spirits,
        2500,
        20,
        40.0,
    ),
    SampleProduct::new(
        "Captain Morgan Spiced Rum 750ml",
        "1234567890012",
        Category::Spirits,
        1800,
        25,
        35.0,
    ),
    SampleProduct::new(
        "Savanna Dry Cider 500ml",
        "1234567890013",
        Category::Cider,
        220,
        75,
        5.5,
    ),
    SampleProduct::new(
        "Hunter's Gold Cider 500ml",
        "1234567890014",
        Category::Cider,
        240,
        65,
        5.0,
    ),
];

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn barcodes_are_unique() {
        let barcodes: FxHashSet<&str> = SAMPLE_PRODUCTS.iter().map(|p| p.barcode).collect();

        assert_eq!(barcodes.len(), SAMPLE_PRODUCTS.len());
    }

    #[test]
    fn every_sample_is_a_valid_product() {
        for sample in SAMPLE_PRODUCTS {
            assert!(
                sample.new_product().normalized().is_ok(),
                "{} should be valid",
                sample.name
            );
        }
    }

    #[test]
    fn prices_are_in_cents() {
        assert_eq!(SAMPLE_PRODUCTS.first().map(SampleProduct::price), Some(25_000));
    }
}
