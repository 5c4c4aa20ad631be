//! Auth data models.

use jiff::Timestamp;

use crate::{domain::users::records::UserRecord, uuids::TypedUuid};

/// Session marker type.
#[derive(Debug)]
pub struct Session;

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

/// Session data used while authenticating a request.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub uuid: SessionUuid,

    /// SHA-256 of the token secret.
    pub token_hash: String,

    pub user: UserRecord,
    pub expires_at: Timestamp,
}

/// The user behind a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub session: SessionUuid,
    pub user: UserRecord,
    pub expires_at: Timestamp,
}

/// Login result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub authenticated: AuthenticatedUser,
}
