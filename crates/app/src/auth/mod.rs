//! Authentication
//!
//! Staff log in with email and password and receive an opaque session token.
//! Only a SHA-256 hash of the token's secret half is stored.

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::*;
pub(crate) use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
