//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        products::{PgProductsService, ProductsService},
        seed::{CatalogSeedService, SeedService},
        transactions::{PgTransactionsService, TransactionsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub seed: Arc<dyn SeedService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        session_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());
        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        Ok(Self {
            seed: Arc::new(CatalogSeedService::new(Arc::clone(&products))),
            products,
            transactions: Arc::new(PgTransactionsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, session_ttl)),
        })
    }
}
