//! Create Transaction Handler

use std::sync::Arc;

use cellar::{
    checkout::{Checkout, CheckoutLine},
    payments::{PaymentKind, PaymentMethod},
};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    extensions::*,
    observability::metrics,
    state::State,
    transactions::{
        errors::into_status_error,
        handlers::{TransactionItem, TransactionResponse},
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTransactionRequest {
    pub items: Vec<TransactionItem>,

    /// One of cash, card or mobile
    pub payment_method: String,

    /// Sale total in cents; must equal the sum of item subtotals
    pub total: u64,

    /// Customer phone number, required for mobile payments
    #[serde(default)]
    pub mobile_phone: Option<String>,
}

/// Create Transaction Handler
///
/// Records a sale for the signed-in user.
#[endpoint(
    tags("transactions"),
    summary = "Record Sale",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Sale recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Inconsistent or invalid sale"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTransactionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;
    let request = json.into_inner();

    let kind = request
        .payment_method
        .parse::<PaymentKind>()
        .or_400("Invalid payment method")?;

    let payment = PaymentMethod::new(kind, request.mobile_phone.as_deref())
        .or_400("Invalid payment details")?;

    let checkout = Checkout::from_submitted(
        request.items.into_iter().map(CheckoutLine::from),
        payment,
        request.total,
    )
    .or_400("Invalid sale")?;

    let transaction = state
        .app
        .transactions
        .record_transaction(current.authenticated.user.uuid, checkout)
        .await
        .map_err(into_status_error)?;

    metrics::record_sale();

    info!(
        user = %transaction.owner.uuid,
        token = %transaction.token,
        total = transaction.total,
        "sale recorded"
    );

    res.add_header(
        LOCATION,
        format!("/transactions/{}", transaction.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(transaction.into()))
}
