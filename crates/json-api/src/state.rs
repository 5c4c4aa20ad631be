//! State

use std::sync::Arc;

use cellar_app::context::AppContext;
use jiff::tz::TimeZone;

/// Store details shown on receipts and used to cut sales into days.
#[derive(Debug, Clone)]
pub(crate) struct StoreSettings {
    pub(crate) name: String,
    pub(crate) time_zone: TimeZone,
}

/// How the session cookie is written.
#[derive(Debug, Clone)]
pub(crate) struct SessionSettings {
    pub(crate) cookie_name: String,
    pub(crate) secure: bool,
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) store: StoreSettings,
    pub(crate) sessions: SessionSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, store: StoreSettings, sessions: SessionSettings) -> Self {
        Self {
            app,
            store,
            sessions,
        }
    }

    #[must_use]
    pub(crate) fn shared(
        app: AppContext,
        store: StoreSettings,
        sessions: SessionSettings,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, store, sessions))
    }
}
