//! Test helpers.

use std::sync::Arc;

use cellar_app::{
    auth::{AuthenticatedUser, MockAuthService, SessionUuid},
    context::AppContext,
    domain::{
        products::MockProductsService,
        seed::MockSeedService,
        transactions::MockTransactionsService,
        users::{MockUsersService, records::UserRecord, records::UserUuid},
    },
};
use jiff::{Timestamp, tz::TimeZone};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    extensions::*,
    state::{SessionSettings, State, StoreSettings},
};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_TOKEN: &str = "cs_test.token";

pub(crate) fn authenticated_user() -> AuthenticatedUser {
    AuthenticatedUser {
        session: SessionUuid::from_uuid(Uuid::nil()),
        user: UserRecord {
            uuid: TEST_USER_UUID,
            name: "Till One".to_string(),
            email: "till@example.com".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        },
        expires_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(CurrentUser {
        token: TEST_TOKEN.to_string(),
        authenticated: authenticated_user(),
    });

    ctrl.call_next(req, depot, res).await;
}

/// Service doubles for every state field. Any call without an expectation panics.
#[derive(Default)]
pub(crate) struct TestState {
    pub products: MockProductsService,
    pub transactions: MockTransactionsService,
    pub users: MockUsersService,
    pub auth: MockAuthService,
    pub seed: MockSeedService,
}

impl TestState {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(
            AppContext {
                products: Arc::new(self.products),
                transactions: Arc::new(self.transactions),
                users: Arc::new(self.users),
                auth: Arc::new(self.auth),
                seed: Arc::new(self.seed),
            },
            StoreSettings {
                name: "Test Cellar".to_string(),
                time_zone: TimeZone::UTC,
            },
            SessionSettings {
                cookie_name: "cellar_session".to_string(),
                secure: false,
            },
        )
    }
}

/// A route behind a fake signed-in user.
pub(crate) fn authenticated_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

/// A route with no user at all.
pub(crate) fn public_service(state: TestState, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state.into_state())).push(route))
}

pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}
