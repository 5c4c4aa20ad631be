//! Products

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while parsing a product category.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    /// The value is not one of the known categories.
    #[error("unknown product category: {0}")]
    Unknown(String),
}

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Beer and lager
    Beer,

    /// Wine
    Wine,

    /// Spirits
    Spirits,

    /// Cider
    Cider,

    /// Anything else
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Self::Beer,
        Self::Wine,
        Self::Spirits,
        Self::Cider,
        Self::Other,
    ];

    /// Lowercase storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beer => "beer",
            Self::Wine => "wine",
            Self::Spirits => "spirits",
            Self::Cider => "cider",
            Self::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalised)
            .ok_or_else(|| CategoryError::Unknown(value.to_string()))
    }
}

/// Category filter, as offered by the catalog screens.
///
/// `"all"` (any case) and an empty value mean no filtering.
///
/// # Errors
///
/// Returns [`CategoryError`] if the value is neither `all` nor a known category.
pub fn parse_category_filter(value: Option<&str>) -> Result<Option<Category>, CategoryError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// The parts of a catalog product a cart needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    /// Product identifier
    pub id: Uuid,

    /// Product name at the time the snapshot was taken
    pub name: String,

    /// Barcode
    pub barcode: String,

    /// Category
    pub category: Category,

    /// Unit price in minor currency units
    pub price: u64,
}

/// Client-side catalog filter: category plus free text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Restrict to one category
    pub category: Option<Category>,

    /// Case-insensitive substring of the name, or substring of the barcode
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Whether a product with the given fields passes this filter.
    pub fn matches(&self, name: &str, barcode: &str, category: Category) -> bool {
        if self.category.is_some_and(|wanted| wanted != category) {
            return false;
        }

        let Some(search) = self.search.as_deref().map(str::trim) else {
            return true;
        };

        if search.is_empty() {
            return true;
        }

        name.to_lowercase().contains(&search.to_lowercase()) || barcode.contains(search)
    }

    /// Filter a list of snapshots, preserving order.
    pub fn apply<'a>(
        &'a self,
        products: &'a [ProductSnapshot],
    ) -> impl Iterator<Item = &'a ProductSnapshot> + 'a {
        products
            .iter()
            .filter(|product| self.matches(&product.name, &product.barcode, product.category))
    }
}
