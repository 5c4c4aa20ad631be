//! Cart checkout.

use cellar::{cart::Cart, checkout::Checkout, payments::PaymentMethod};
use tracing::warn;

use crate::domain::{
    transactions::{
        TransactionsService, errors::TransactionsServiceError, records::TransactionRecord,
    },
    users::records::UserUuid,
};

/// Record the contents of a cart as a sale.
///
/// The cart is cleared only once the sale has been stored; on any error it is
/// left exactly as it was so the cashier can retry.
///
/// # Errors
///
/// Returns [`TransactionsServiceError::Checkout`] for an empty cart, or the
/// service's error if recording fails.
pub async fn checkout(
    service: &dyn TransactionsService,
    user: UserUuid,
    cart: &mut Cart,
    payment: PaymentMethod,
) -> Result<TransactionRecord, TransactionsServiceError> {
    let sale = Checkout::from_cart(cart, payment)?;

    match service.record_transaction(user, sale).await {
        Ok(recorded) => {
            cart.clear();

            Ok(recorded)
        }
        Err(error) => {
            warn!(%error, %user, "checkout failed, cart kept");

            Err(error)
        }
    }
}
