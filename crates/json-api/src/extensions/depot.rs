//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use crate::auth::CurrentUser;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_current_user(&mut self, user: CurrentUser);

    fn current_user_or_401(&self) -> Result<&CurrentUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: CurrentUser) {
        self.inject(user);
    }

    fn current_user_or_401(&self) -> Result<&CurrentUser, StatusError> {
        self.obtain::<CurrentUser>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
