//! Cellar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    checkout::{Checkout, CheckoutError, CheckoutLine},
    inventory::{InventorySummary, LOW_STOCK_THRESHOLD, StockLevel},
    payments::{PaymentError, PaymentKind, PaymentMethod, PhoneNumber},
    products::{Category, CategoryError, CatalogFilter, ProductSnapshot, parse_category_filter},
    receipt::{DEFAULT_CURRENCY, Receipt, ReceiptError},
    sales::SalesSummary,
};
