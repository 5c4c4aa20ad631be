//! Authentication

use cellar_app::auth::AuthenticatedUser;

pub(crate) mod middleware;

/// The signed-in user of the current request, and the token they presented.
#[derive(Debug, Clone)]
pub(crate) struct CurrentUser {
    pub(crate) token: String,
    pub(crate) authenticated: AuthenticatedUser,
}
