//! Catalog Seeding Handler

use std::sync::Arc;

use cellar_app::domain::seed::report::{SeedOutcome, SeedReport, SeedResult};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeedResultResponse {
    pub name: String,
    pub barcode: String,

    /// One of created, skipped or error
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SeedResult> for SeedResultResponse {
    fn from(result: SeedResult) -> Self {
        let (status, message) = match result.outcome {
            SeedOutcome::Created => ("created", None),
            SeedOutcome::Skipped => ("skipped", None),
            SeedOutcome::Error { message } => ("error", Some(message)),
        };

        Self {
            name: result.name,
            barcode: result.barcode,
            status: status.to_string(),
            message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeedReportResponse {
    pub total: usize,
    pub created: usize,
    pub skipped: usize,
    pub errors: usize,
    pub results: Vec<SeedResultResponse>,
}

impl From<SeedReport> for SeedReportResponse {
    fn from(report: SeedReport) -> Self {
        Self {
            total: report.total,
            created: report.created,
            skipped: report.skipped,
            errors: report.errors,
            results: report.results.into_iter().map(Into::into).collect(),
        }
    }
}

/// Seed Catalog Handler
///
/// Inserts the sample catalog, skipping products whose barcode is already
/// present. Safe to call repeatedly.
#[endpoint(
    tags("catalog"),
    summary = "Seed Sample Catalog",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SeedReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;

    let report = state.app.seed.seed_products().await;

    info!(
        user = %current.authenticated.user.uuid,
        created = report.created,
        skipped = report.skipped,
        errors = report.errors,
        "catalog seeded"
    );

    Ok(Json(report.into()))
}
