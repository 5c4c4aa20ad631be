//! Logout Handler

use std::sync::Arc;

use cellar_app::auth::AuthServiceError;
use salvo::prelude::*;
use tracing::error;

use crate::{extensions::*, sessions::cookie::cleared_cookie, state::State};

/// Logout Handler
///
/// Revokes the current session and clears the session cookie.
#[endpoint(
    tags("sessions"),
    summary = "Log Out",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session ended"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;

    match state.app.auth.logout(&current.token).await {
        Ok(()) | Err(AuthServiceError::NotFound) => {}
        Err(source) => {
            error!("failed to end session: {source}");

            return Err(StatusError::internal_server_error());
        }
    }

    res.add_cookie(cleared_cookie(&state.sessions));

    Ok(StatusCode::NO_CONTENT)
}
