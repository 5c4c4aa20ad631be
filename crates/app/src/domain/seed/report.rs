//! Seeding report.

use serde::Serialize;

/// What happened to one sample product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SeedOutcome {
    Created,
    Skipped,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub name: String,
    pub barcode: String,

    #[serde(flatten)]
    pub outcome: SeedOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub total: usize,
    pub created: usize,
    pub skipped: usize,
    pub errors: usize,
    pub results: Vec<SeedResult>,
}

impl SeedReport {
    pub fn push(&mut self, result: SeedResult) {
        self.total += 1;

        match result.outcome {
            SeedOutcome::Created => self.created += 1,
            SeedOutcome::Skipped => self.skipped += 1,
            SeedOutcome::Error { .. } => self.errors += 1,
        }

        self.results.push(result);
    }
}
