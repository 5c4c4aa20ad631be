//! Transaction Records

use cellar::{
    checkout::CheckoutLine,
    payments::PaymentKind,
    receipt::{DEFAULT_CURRENCY, Receipt},
};
use jiff::{Timestamp, tz::TimeZone};

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<TransactionRecord>;

/// Display fields of the user who recorded a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOwner {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

/// Transaction Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub uuid: TransactionUuid,
    pub token: String,
    pub owner: TransactionOwner,
    pub payment: PaymentKind,
    pub mobile_phone: Option<String>,
    pub total: u64,
    pub created_at: Timestamp,
    pub items: Vec<CheckoutLine>,
}

impl TransactionRecord {
    /// Receipt for this sale, dated in the given time zone.
    #[must_use]
    pub fn receipt<'a>(&'a self, store_name: &'a str, time_zone: &TimeZone) -> Receipt<'a> {
        Receipt {
            store_name,
            token: &self.token,
            issued_at: self.created_at.to_zoned(time_zone.clone()),
            lines: &self.items,
            total: self.total,
            payment: self.payment,
            currency: DEFAULT_CURRENCY,
        }
    }
}
