//! Transaction error mapping.

use cellar_app::domain::transactions::TransactionsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::Checkout(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        TransactionsServiceError::AlreadyExists => StatusError::conflict(),
        TransactionsServiceError::NotFound => StatusError::not_found(),
        TransactionsServiceError::InvalidReference
        | TransactionsServiceError::MissingRequiredData
        | TransactionsServiceError::InvalidData => StatusError::bad_request(),
        TransactionsServiceError::Sql(source) => {
            error!("transactions storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
