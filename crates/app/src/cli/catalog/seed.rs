use std::sync::Arc;

use cellar_app::{
    database::{self, Db},
    domain::{
        products::PgProductsService,
        seed::{CatalogSeedService, SeedService, report::SeedOutcome},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = CatalogSeedService::new(Arc::new(PgProductsService::new(Db::new(pool))));
    let report = service.seed_products().await;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|error| format!("failed to serialize report: {error}"))?;

        println!("{json}");
    } else {
        for result in &report.results {
            match &result.outcome {
                SeedOutcome::Created => println!("created  {} {}", result.barcode, result.name),
                SeedOutcome::Skipped => println!("skipped  {} {}", result.barcode, result.name),
                SeedOutcome::Error { message } => {
                    println!("error    {} {}: {message}", result.barcode, result.name);
                }
            }
        }

        println!(
            "total: {}, created: {}, skipped: {}, errors: {}",
            report.total, report.created, report.skipped, report.errors
        );
    }

    if report.errors > 0 {
        return Err(format!("{} products failed to seed", report.errors));
    }

    Ok(())
}
