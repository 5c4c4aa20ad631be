//! Transactions service.

use async_trait::async_trait;
use cellar::checkout::Checkout;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        transactions::{
            data::DayWindow,
            errors::TransactionsServiceError,
            records::{TransactionRecord, TransactionUuid},
            repository::{PgTransactionsRepository, TransactionHeader},
            token::generate_sale_token,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
        }
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn record_transaction(
        &self,
        user: UserUuid,
        checkout: Checkout,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let uuid = TransactionUuid::new();
        let token = generate_sale_token(Timestamp::now());
        let (lines, payment, total) = checkout.into_parts();
        let mobile_phone = payment.phone().map(ToString::to_string);

        let mut tx = self.db.begin().await?;

        self.repository
            .create_transaction(
                &mut tx,
                TransactionHeader {
                    uuid,
                    token: &token,
                    user,
                    payment: payment.kind(),
                    mobile_phone: mobile_phone.as_deref(),
                    total,
                },
            )
            .await?;

        self.repository
            .create_transaction_items(&mut tx, uuid, &lines)
            .await?;

        let recorded = self.repository.get_transaction(&mut tx, user, uuid).await?;

        tx.commit().await?;

        info!(
            transaction = %recorded.uuid,
            token = %recorded.token,
            total = recorded.total,
            items = recorded.items.len(),
            payment = %recorded.payment,
            "recorded sale"
        );

        Ok(recorded)
    }

    async fn list_transactions(
        &self,
        user: UserUuid,
        window: Option<DayWindow>,
    ) -> Result<Vec<TransactionRecord>, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let transactions = self
            .repository
            .list_transactions(&mut tx, user, window)
            .await?;

        tx.commit().await?;

        Ok(transactions)
    }

    async fn get_transaction(
        &self,
        user: UserUuid,
        transaction: TransactionUuid,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let transaction = self
            .repository
            .get_transaction(&mut tx, user, transaction)
            .await?;

        tx.commit().await?;

        Ok(transaction)
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Persist a validated sale and all of its items atomically.
    async fn record_transaction(
        &self,
        user: UserUuid,
        checkout: Checkout,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// Sales recorded by a user, newest first, optionally limited to one day.
    async fn list_transactions(
        &self,
        user: UserUuid,
        window: Option<DayWindow>,
    ) -> Result<Vec<TransactionRecord>, TransactionsServiceError>;

    /// A single sale recorded by a user.
    async fn get_transaction(
        &self,
        user: UserUuid,
        transaction: TransactionUuid,
    ) -> Result<TransactionRecord, TransactionsServiceError>;
}
