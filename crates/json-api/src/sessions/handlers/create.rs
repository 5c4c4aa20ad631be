//! Login Handler

use std::sync::Arc;

use cellar_app::auth::AuthServiceError;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    extensions::*,
    sessions::{cookie::session_cookie, handlers::SessionResponse},
    state::State,
};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Login Handler
///
/// Starts a session and sets the session cookie.
#[endpoint(
    tags("sessions"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session started"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = match state.app.auth.login(&request.email, &request.password).await {
        Ok(issued) => issued,
        Err(AuthServiceError::InvalidCredentials | AuthServiceError::NotFound) => {
            return Err(StatusError::unauthorized().brief("Invalid credentials"));
        }
        Err(source) => {
            error!("failed to start session: {source}");

            return Err(StatusError::internal_server_error());
        }
    };

    res.add_cookie(session_cookie(&state.sessions, issued.token.clone()))
        .status_code(StatusCode::CREATED);

    Ok(Json(SessionResponse {
        token: Some(issued.token),
        ..SessionResponse::from(issued.authenticated)
    }))
}
