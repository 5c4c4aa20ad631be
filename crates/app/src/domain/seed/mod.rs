//! Catalog seeding

pub mod catalog;
pub mod errors;
pub mod report;
pub mod service;

pub use errors::SeedError;
pub use service::*;
