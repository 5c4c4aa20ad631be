//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::auth::{
    AuthServiceError, AuthenticatedUser, IssuedSession, ParsedSessionToken, SessionUuid,
    format_session_token, generate_session_secret, models::ActiveSession, parse_session_token,
    repository::PgAuthRepository, verify_password,
};

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(12);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, session_ttl: SignedDuration) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            session_ttl,
        }
    }

    /// Find the active session a token refers to and check its secret.
    async fn resolve(&self, token: &str) -> Result<ActiveSession, AuthServiceError> {
        let ParsedSessionToken {
            session_uuid,
            secret,
        } = parse_session_token(token).map_err(|_| AuthServiceError::NotFound)?;

        let session = self
            .repository
            .find_active_session(SessionUuid::from_uuid(session_uuid), Timestamp::now())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session.token_hash != secret.hash() {
            return Err(AuthServiceError::NotFound);
        }

        Ok(session)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let credentials = self
            .repository
            .find_credentials_by_email(email.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let session = SessionUuid::new();
        let secret = generate_session_secret();

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::Expiry)?;

        self.repository
            .create_session(session, credentials.user.uuid, &secret.hash(), expires_at)
            .await?;

        info!(user = %credentials.user.uuid, %session, "session started");

        Ok(IssuedSession {
            token: format_session_token(session.into_uuid(), &secret),
            authenticated: AuthenticatedUser {
                session,
                user: credentials.user,
                expires_at,
            },
        })
    }

    async fn authenticate_session(
        &self,
        token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let session = self.resolve(token).await?;

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.repository.touch_session(session.uuid).await {
            debug!(%error, session = %session.uuid, "failed to touch session");
        }

        Ok(AuthenticatedUser {
            session: session.uuid,
            user: session.user,
            expires_at: session.expires_at,
        })
    }

    async fn logout(&self, token: &str) -> Result<(), AuthServiceError> {
        let session = self.resolve(token).await?;

        if !self.repository.revoke_session(session.uuid).await? {
            return Err(AuthServiceError::NotFound);
        }

        info!(user = %session.user.uuid, session = %session.uuid, "session ended");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Start a session for the user with this email and password.
    ///
    /// An unknown email and a wrong password are indistinguishable.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a session token to its user. Malformed, unknown, expired and
    /// revoked tokens all yield [`AuthServiceError::NotFound`].
    async fn authenticate_session(&self, token: &str)
    -> Result<AuthenticatedUser, AuthServiceError>;

    /// Revoke the session behind a token.
    async fn logout(&self, token: &str) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::records::UserUuid,
        test::{
            TestContext,
            helpers::{TEST_PASSWORD, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn login_then_authenticate_returns_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, UserUuid::new(), "till@example.com").await?;

        let issued = ctx.auth.login("TILL@example.com", TEST_PASSWORD).await?;

        assert!(issued.token.starts_with("cs_"));
        assert_eq!(issued.authenticated.user, user);
        assert!(issued.authenticated.expires_at > Timestamp::now());

        let authenticated = ctx.auth.authenticate_session(&issued.token).await?;

        assert_eq!(authenticated, issued.authenticated);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, UserUuid::new(), "till@example.com").await?;

        let wrong_password = ctx.auth.login("till@example.com", "not the password").await;
        let unknown_email = ctx.auth.login("nobody@example.com", TEST_PASSWORD).await;

        assert!(
            matches!(wrong_password, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong_password:?}"
        );
        assert!(
            matches!(unknown_email, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {unknown_email:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_session() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, UserUuid::new(), "till@example.com").await?;

        let issued = ctx.auth.login("till@example.com", TEST_PASSWORD).await?;

        ctx.auth.logout(&issued.token).await?;

        let result = ctx.auth.authenticate_session(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound after logout, got {result:?}"
        );

        let second_logout = ctx.auth.logout(&issued.token).await;

        assert!(matches!(second_logout, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn tampered_and_malformed_tokens_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, UserUuid::new(), "till@example.com").await?;

        let issued = ctx.auth.login("till@example.com", TEST_PASSWORD).await?;

        let (prefix, _secret) = issued.token.split_once('.').ok_or("token has a secret")?;
        let tampered = format!("{prefix}.{}", "0".repeat(64));

        for token in [tampered.as_str(), "garbage", ""] {
            let result = ctx.auth.authenticate_session(token).await;

            assert!(
                matches!(result, Err(AuthServiceError::NotFound)),
                "expected NotFound for {token:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn expired_sessions_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, UserUuid::new(), "till@example.com").await?;

        let auth = PgAuthService::new(ctx.db.pool().clone(), SignedDuration::from_secs(-1));
        let issued = auth.login("till@example.com", TEST_PASSWORD).await?;

        let result = auth.authenticate_session(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound for expired session, got {result:?}"
        );

        Ok(())
    }
}
