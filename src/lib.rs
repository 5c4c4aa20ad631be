//! Cellar
//!
//! Point-of-sale domain core for a retail liquor store: product categories and
//! catalog filtering, the checkout cart, payment methods, sale verification,
//! receipts, and sales and inventory summaries.

pub mod cart;
pub mod checkout;
pub mod inventory;
pub mod payments;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod sales;
