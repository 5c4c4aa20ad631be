//! Session Handlers

use cellar_app::auth::AuthenticatedUser;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub(crate) mod create;
pub(crate) mod current;
pub(crate) mod delete;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    pub user: UserResponse,

    /// When the session stops being accepted
    pub expires_at: String,

    /// Raw session token; only returned at login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<AuthenticatedUser> for SessionResponse {
    fn from(authenticated: AuthenticatedUser) -> Self {
        Self {
            user: UserResponse {
                uuid: authenticated.user.uuid.into(),
                name: authenticated.user.name,
                email: authenticated.user.email,
            },
            expires_at: authenticated.expires_at.to_string(),
            token: None,
        }
    }
}
