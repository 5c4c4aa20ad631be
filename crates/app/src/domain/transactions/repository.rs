//! Transactions Repository

use cellar::{checkout::CheckoutLine, payments::PaymentKind};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{decode_u32, decode_u64, encode_u64},
    domain::{
        transactions::{
            data::DayWindow,
            records::{TransactionOwner, TransactionRecord, TransactionUuid},
        },
        users::records::UserUuid,
    },
};

const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");
const CREATE_TRANSACTION_ITEM_SQL: &str = include_str!("sql/create_transaction_item.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const GET_TRANSACTION_SQL: &str = include_str!("sql/get_transaction.sql");
const LIST_TRANSACTION_ITEMS_SQL: &str = include_str!("sql/list_transaction_items.sql");

/// Transaction header as stored, before items are attached.
#[derive(Debug, Clone)]
pub(crate) struct TransactionRow {
    pub uuid: TransactionUuid,
    pub token: String,
    pub owner: TransactionOwner,
    pub payment: PaymentKind,
    pub mobile_phone: Option<String>,
    pub total: u64,
    pub created_at: Timestamp,
}

impl TransactionRow {
    fn with_items(self, items: Vec<CheckoutLine>) -> TransactionRecord {
        TransactionRecord {
            uuid: self.uuid,
            token: self.token,
            owner: self.owner,
            payment: self.payment,
            mobile_phone: self.mobile_phone,
            total: self.total,
            created_at: self.created_at,
            items,
        }
    }
}

/// Header fields for a new transaction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransactionHeader<'a> {
    pub uuid: TransactionUuid,
    pub token: &'a str,
    pub user: UserUuid,
    pub payment: PaymentKind,
    pub mobile_phone: Option<&'a str>,
    pub total: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        header: TransactionHeader<'_>,
    ) -> Result<Timestamp, sqlx::Error> {
        let created_at: SqlxTimestamp = query(CREATE_TRANSACTION_SQL)
            .bind(header.uuid.into_uuid())
            .bind(header.token)
            .bind(header.user.into_uuid())
            .bind(header.payment.as_str())
            .bind(header.mobile_phone)
            .bind(encode_u64(header.total, "total")?)
            .fetch_one(&mut **tx)
            .await?
            .try_get("created_at")?;

        Ok(created_at.to_jiff())
    }

    pub(crate) async fn create_transaction_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: TransactionUuid,
        items: &[CheckoutLine],
    ) -> Result<(), sqlx::Error> {
        for (position, item) in items.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|e| sqlx::Error::Encode(format!("position: {e}").into()))?;

            query(CREATE_TRANSACTION_ITEM_SQL)
                .bind(transaction.into_uuid())
                .bind(position)
                .bind(item.product_id)
                .bind(&item.product_name)
                .bind(i64::from(item.quantity))
                .bind(encode_u64(item.price, "price")?)
                .bind(encode_u64(item.subtotal, "subtotal")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        window: Option<DayWindow>,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        let rows = query_as::<Postgres, TransactionRow>(LIST_TRANSACTIONS_SQL)
            .bind(user.into_uuid())
            .bind(window.map(|w| SqlxTimestamp::from(w.start)))
            .bind(window.map(|w| SqlxTimestamp::from(w.end)))
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, rows).await
    }

    pub(crate) async fn get_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        transaction: TransactionUuid,
    ) -> Result<TransactionRecord, sqlx::Error> {
        let row = query_as::<Postgres, TransactionRow>(GET_TRANSACTION_SQL)
            .bind(transaction.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.attach_items(tx, vec![row])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rows: Vec<TransactionRow>,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = rows.iter().map(|row| row.uuid.into_uuid()).collect();

        let item_rows = query(LIST_TRANSACTION_ITEMS_SQL)
            .bind(uuids.as_slice())
            .fetch_all(&mut **tx)
            .await?;

        let mut items: FxHashMap<Uuid, Vec<CheckoutLine>> = FxHashMap::default();

        for row in &item_rows {
            let transaction: Uuid = row.try_get("transaction_uuid")?;

            items
                .entry(transaction)
                .or_default()
                .push(checkout_line_from_row(row)?);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = items.remove(&row.uuid.into_uuid()).unwrap_or_default();

                row.with_items(lines)
            })
            .collect())
    }
}

fn checkout_line_from_row(row: &PgRow) -> sqlx::Result<CheckoutLine> {
    Ok(CheckoutLine {
        product_id: row.try_get("product_uuid")?,
        product_name: row.try_get("product_name")?,
        quantity: decode_u32(row, "quantity")?,
        price: decode_u64(row, "price")?,
        subtotal: decode_u64(row, "subtotal")?,
    })
}

impl<'r> FromRow<'r, PgRow> for TransactionRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment: String = row.try_get("payment_method")?;

        let payment = payment
            .parse::<PaymentKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "payment_method".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            token: row.try_get("token")?,
            owner: TransactionOwner {
                uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
                name: row.try_get("user_name")?,
                email: row.try_get("user_email")?,
            },
            payment,
            mobile_phone: row.try_get("mobile_phone")?,
            total: decode_u64(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
