//! Cellar Domain Concerns

pub mod products;
pub mod seed;
pub mod transactions;
pub mod users;
