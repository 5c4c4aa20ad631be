//! Transactions
//!
//! Sales are recorded from the client's cart. Every line subtotal and the sale
//! total are checked again here before anything is stored.

mod errors;
mod handlers;

pub(crate) use handlers::*;
