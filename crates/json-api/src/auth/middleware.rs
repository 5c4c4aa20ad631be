//! Auth middleware.

use std::sync::Arc;

use cellar_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{auth::CurrentUser, extensions::*, state::State};

/// Resolve the session cookie or bearer token to a user, or answer 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let Some(token) = extract_token(req, &state.sessions.cookie_name) else {
        res.render(StatusError::unauthorized().brief("Authentication required"));
        ctrl.skip_rest();

        return;
    };

    let authenticated = match state.app.auth.authenticate_session(&token).await {
        Ok(authenticated) => authenticated,
        Err(AuthServiceError::NotFound | AuthServiceError::InvalidCredentials) => {
            res.render(StatusError::unauthorized().brief("Authentication required"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate session: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_current_user(CurrentUser {
        token,
        authenticated,
    });

    ctrl.call_next(req, depot, res).await;
}

/// The session cookie wins over an `Authorization: Bearer` header.
fn extract_token(req: &Request, cookie_name: &str) -> Option<String> {
    let from_cookie = req
        .cookie(cookie_name)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty());

    from_cookie
        .or_else(|| extract_bearer_token(req))
        .map(ToString::to_string)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use cellar_app::auth::{MockAuthService, SessionTokenError};
    use salvo::{
        affix_state::inject,
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TestState, authenticated_user};

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let email = depot.current_user_or_401().ok().map_or_else(
            || "missing".to_string(),
            |current| current.authenticated.user.email.clone(),
        );

        res.render(email);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = TestState {
            auth,
            ..TestState::default()
        }
        .into_state();

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_session_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .withf(|token| token == "cs_abc.123")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer cs_abc.123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_internal_auth_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .return_once(|_| Err(AuthServiceError::Token(SessionTokenError::InvalidFormat)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer cs_abc.123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_bearer_token_injects_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .withf(|token| token == "cs_abc.123")
            .return_once(|_| Ok(authenticated_user()));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer cs_abc.123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "till@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_session_cookie_takes_precedence() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_session()
            .once()
            .withf(|token| token == "cs_cookie.456")
            .return_once(|_| Ok(authenticated_user()));

        let res = TestClient::get("http://example.com")
            .add_header(COOKIE, "cellar_session=cs_cookie.456", true)
            .add_header(AUTHORIZATION, "Bearer cs_abc.123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
