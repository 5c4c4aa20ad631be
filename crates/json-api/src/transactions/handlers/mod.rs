//! Transaction Handlers

use cellar::checkout::CheckoutLine;
use cellar_app::domain::transactions::records::TransactionRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod receipt;

/// A sold line as stored with the sale.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionItem {
    /// Catalog product, when the line came from the catalog
    #[serde(default)]
    pub product_id: Option<Uuid>,

    pub product_name: String,

    pub quantity: u32,

    /// Unit price in cents
    pub price: u64,

    /// `price` x `quantity`, in cents
    pub subtotal: u64,
}

impl From<CheckoutLine> for TransactionItem {
    fn from(line: CheckoutLine) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            price: line.price,
            subtotal: line.subtotal,
        }
    }
}

impl From<TransactionItem> for CheckoutLine {
    fn from(item: TransactionItem) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionResponse {
    pub uuid: Uuid,

    /// Human-readable sale reference printed on the receipt
    pub token: String,

    pub user_uuid: Uuid,

    pub user_name: String,

    pub user_email: String,

    /// One of cash, card or mobile
    pub payment_method: String,

    pub mobile_phone: Option<String>,

    /// Sale total in cents
    pub total: u64,

    pub created_at: String,

    pub items: Vec<TransactionItem>,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(transaction: TransactionRecord) -> Self {
        TransactionResponse {
            uuid: transaction.uuid.into(),
            token: transaction.token,
            user_uuid: transaction.owner.uuid.into(),
            user_name: transaction.owner.name,
            user_email: transaction.owner.email,
            payment_method: transaction.payment.to_string(),
            mobile_phone: transaction.mobile_phone,
            total: transaction.total,
            created_at: transaction.created_at.to_string(),
            items: transaction.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use cellar::payments::PaymentKind;
    use cellar_app::domain::transactions::records::{TransactionOwner, TransactionUuid};
    use jiff::Timestamp;

    use crate::test_helpers::TEST_USER_UUID;

    use super::*;

    pub(crate) fn make_transaction(uuid: TransactionUuid, total: u64) -> TransactionRecord {
        TransactionRecord {
            uuid,
            token: "SALE-1717171717171-ab12cd".to_string(),
            owner: TransactionOwner {
                uuid: TEST_USER_UUID,
                name: "Till One".to_string(),
                email: "till@example.com".to_string(),
            },
            payment: PaymentKind::Cash,
            mobile_phone: None,
            total,
            created_at: Timestamp::UNIX_EPOCH,
            items: vec![CheckoutLine {
                product_id: None,
                product_name: "Tusker Lager 500ml".to_string(),
                quantity: 1,
                price: total,
                subtotal: total,
            }],
        }
    }
}
