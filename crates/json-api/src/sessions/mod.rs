//! Sessions
//!
//! Login issues a session token in an HTTP-only cookie and in the response
//! body, for clients that prefer an `Authorization: Bearer` header.

mod cookie;
mod handlers;

pub(crate) use handlers::*;
