//! List Transactions Handler

use std::sync::Arc;

use cellar::sales::SalesSummary;
use cellar_app::domain::transactions::data::DayWindow;
use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, handlers::TransactionResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SalesSummaryResponse {
    /// Sum of sale totals, in cents
    pub total_revenue: u64,

    pub transaction_count: usize,
}

impl From<SalesSummary> for SalesSummaryResponse {
    fn from(summary: SalesSummary) -> Self {
        Self {
            total_revenue: summary.total_revenue,
            transaction_count: summary.transaction_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    pub summary: SalesSummaryResponse,
}

/// List Transactions Handler
///
/// Returns the signed-in user's sales, newest first. With `date`, only sales
/// made on that day in the store's time zone.
#[endpoint(
    tags("transactions"),
    summary = "List Sales",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;

    let window = match date.into_inner() {
        Some(date) => {
            let date = date.parse::<Date>().or_400("Invalid date")?;

            Some(DayWindow::for_date(date, &state.store.time_zone).or_400("Invalid date")?)
        }
        None => None,
    };

    let transactions = state
        .app
        .transactions
        .list_transactions(current.authenticated.user.uuid, window)
        .await
        .map_err(into_status_error)?;

    let summary = SalesSummary::from_totals(transactions.iter().map(|t| t.total));

    Ok(Json(TransactionsResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
        summary: summary.into(),
    }))
}

#[cfg(test)]
mod tests {
    use cellar_app::domain::transactions::{MockTransactionsService, records::TransactionUuid};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        test_helpers::{TEST_USER_UUID, TestState, authenticated_service},
        transactions::handlers::tests::make_transaction,
    };

    use super::*;

    fn make_service(transactions: MockTransactionsService) -> Service {
        authenticated_service(
            TestState {
                transactions,
                ..TestState::default()
            },
            Router::with_path("transactions").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_sales_and_summary() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .withf(|user, window| *user == TEST_USER_UUID && window.is_none())
            .return_once(|_, _| {
                Ok(vec![
                    make_transaction(TransactionUuid::new(), 25_000),
                    make_transaction(TransactionUuid::new(), 85_000),
                ])
            });

        let body: TransactionsResponse = TestClient::get("http://example.com/transactions")
            .send(&make_service(transactions))
            .await
            .take_json()
            .await?;

        assert_eq!(body.transactions.len(), 2);
        assert_eq!(body.summary.total_revenue, 110_000);
        assert_eq!(body.summary.transaction_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_date_filter_uses_store_day() -> TestResult {
        let mut transactions = MockTransactionsService::new();
        let start: Timestamp = "2024-03-01T00:00:00Z".parse()?;
        let end: Timestamp = "2024-03-02T00:00:00Z".parse()?;

        transactions
            .expect_list_transactions()
            .once()
            .withf(move |_, window| *window == Some(DayWindow { start, end }))
            .return_once(|_, _| Ok(Vec::new()));

        let body: TransactionsResponse =
            TestClient::get("http://example.com/transactions?date=2024-03-01")
                .send(&make_service(transactions))
                .await
                .take_json()
                .await?;

        assert!(body.transactions.is_empty());
        assert_eq!(body.summary.total_revenue, 0);
        assert_eq!(body.summary.transaction_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_date_returns_400() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions.expect_list_transactions().never();

        let res = TestClient::get("http://example.com/transactions?date=yesterday")
            .send(&make_service(transactions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
