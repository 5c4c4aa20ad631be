//! Transactions
//!
//! Recorded sales. A transaction and its items are written in one database
//! transaction and never change afterwards.

pub mod checkout;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod token;

pub use checkout::checkout;
pub use errors::TransactionsServiceError;
pub use service::*;
