//! Current Session Handler

use salvo::prelude::*;

use crate::{extensions::*, sessions::handlers::SessionResponse};

/// Current Session Handler
///
/// Returns the signed-in user.
#[endpoint(
    tags("sessions"),
    summary = "Current Session",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SessionResponse>, StatusError> {
    let current = depot.current_user_or_401()?;

    Ok(Json(current.authenticated.clone().into()))
}
