//! Transaction Receipt Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

/// Transaction Receipt Handler
///
/// Returns a printable plain-text receipt for one of the signed-in user's sales.
#[endpoint(
    tags("transactions"),
    summary = "Sale Receipt",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plain-text receipt"),
        (status_code = StatusCode::NOT_FOUND, description = "Sale not found"),
    ),
)]
pub(crate) async fn handler(
    transaction: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;

    let transaction = state
        .app
        .transactions
        .get_transaction(
            current.authenticated.user.uuid,
            transaction.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    let receipt = transaction
        .receipt(&state.store.name, &state.store.time_zone)
        .render()
        .or_500("failed to render receipt")?;

    res.render(Text::Plain(receipt));

    Ok(StatusCode::OK)
}
