//! Seed service.

use std::{error::Error as _, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::domain::{
    products::{ProductsService, ProductsServiceError},
    seed::{
        catalog::{SAMPLE_PRODUCTS, SampleProduct},
        errors::SeedError,
        report::{SeedOutcome, SeedReport, SeedResult},
    },
};

/// Seeds the sample catalog through a products service.
#[derive(Clone)]
pub struct CatalogSeedService {
    products: Arc<dyn ProductsService>,
}

impl CatalogSeedService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self { products }
    }

    async fn seed_one(&self, sample: &SampleProduct) -> Result<SeedOutcome, SeedError> {
        let existing = self
            .products
            .find_product_by_barcode(sample.barcode)
            .await
            .map_err(SeedError::Lookup)?;

        if existing.is_some() {
            return Ok(SeedOutcome::Skipped);
        }

        match self.products.create_product(sample.new_product()).await {
            Ok(_) => Ok(SeedOutcome::Created),
            // Another writer inserted the barcode between lookup and insert.
            Err(ProductsServiceError::AlreadyExists) => Ok(SeedOutcome::Skipped),
            Err(error) => Err(SeedError::Create(error)),
        }
    }
}

impl std::fmt::Debug for CatalogSeedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSeedService").finish_non_exhaustive()
    }
}

#[async_trait]
impl SeedService for CatalogSeedService {
    async fn seed_products(&self) -> SeedReport {
        let mut report = SeedReport::default();

        for sample in &SAMPLE_PRODUCTS {
            let outcome = match self.seed_one(sample).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(%error, barcode = sample.barcode, "failed to seed product");

                    SeedOutcome::Error {
                        message: describe(&error),
                    }
                }
            };

            report.push(SeedResult {
                name: sample.name.to_string(),
                barcode: sample.barcode.to_string(),
                outcome,
            });
        }

        info!(
            total = report.total,
            created = report.created,
            skipped = report.skipped,
            errors = report.errors,
            "seeded catalog"
        );

        report
    }
}

fn describe(error: &SeedError) -> String {
    match error.source() {
        Some(source) => format!("{error}: {source}"),
        None => error.to_string(),
    }
}

#[automock]
#[async_trait]
pub trait SeedService: Send + Sync {
    /// Insert every sample product whose barcode is not yet in the catalog.
    ///
    /// Each product is handled on its own; a failure is recorded in the report
    /// and the remaining products are still attempted.
    async fn seed_products(&self) -> SeedReport;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use cellar::products::Category;
    use jiff::Timestamp;
    use rustc_hash::FxHashSet;

    use crate::domain::products::{
        MockProductsService,
        data::NewProduct,
        records::{ProductRecord, ProductUuid},
    };

    use super::*;

    fn record(product: &NewProduct) -> ProductRecord {
        ProductRecord {
            uuid: product.uuid,
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            category: product.category,
            price: product.price,
            stock: product.stock,
            abv: product.abv,
            description: None,
            image_url: None,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    /// A products service that remembers the barcodes created through it.
    fn remembering_service(stored: Arc<Mutex<FxHashSet<String>>>) -> MockProductsService {
        let mut products = MockProductsService::new();
        let lookups = Arc::clone(&stored);

        products
            .expect_find_product_by_barcode()
            .returning(move |barcode| {
                let found = lookups
                    .lock()
                    .map(|set| set.contains(barcode))
                    .unwrap_or_default();

                Ok(found.then(|| {
                    record(&NewProduct {
                        uuid: ProductUuid::new(),
                        name: "Seeded".to_string(),
                        barcode: barcode.to_string(),
                        category: Category::Beer,
                        price: 25_000,
                        stock: 10,
                        abv: None,
                        description: None,
                        image_url: None,
                    })
                }))
            });

        products.expect_create_product().returning(move |product| {
            if let Ok(mut set) = stored.lock() {
                set.insert(product.barcode.clone());
            }

            Ok(record(&product))
        });

        products
    }

    #[tokio::test]
    async fn first_run_creates_every_sample() {
        let stored = Arc::new(Mutex::new(FxHashSet::default()));
        let service = CatalogSeedService::new(Arc::new(remembering_service(stored)));

        let report = service.seed_products().await;

        assert_eq!(report.total, 14);
        assert_eq!(report.created, 14);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.errors, 0);
        assert!(report.results.iter().all(|r| r.outcome == SeedOutcome::Created));
    }

    #[tokio::test]
    async fn second_run_skips_everything() {
        let stored = Arc::new(Mutex::new(FxHashSet::default()));
        let service = CatalogSeedService::new(Arc::new(remembering_service(stored)));

        service.seed_products().await;
        let report = service.seed_products().await;

        assert_eq!(report.total, 14);
        assert_eq!(report.created, 0);
        assert_eq!(report.skipped, 14);
        assert_eq!(report.errors, 0);
    }

    #[tokio::test]
    async fn concurrent_duplicate_counts_as_skipped() {
        let mut products = MockProductsService::new();

        products
            .expect_find_product_by_barcode()
            .returning(|_| Ok(None));
        products
            .expect_create_product()
            .returning(|_| Err(ProductsServiceError::AlreadyExists));

        let report = CatalogSeedService::new(Arc::new(products))
            .seed_products()
            .await;

        assert_eq!(report.skipped, 14);
        assert_eq!(report.errors, 0);
    }

    #[tokio::test]
    async fn failures_are_recorded_and_seeding_continues() {
        let mut products = MockProductsService::new();

        products
            .expect_find_product_by_barcode()
            .returning(|_| Ok(None));
        products.expect_create_product().returning(|product| {
            if product.barcode == "1234567890003" {
                Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut))
            } else {
                Ok(record(&product))
            }
        });

        let report = CatalogSeedService::new(Arc::new(products))
            .seed_products()
            .await;

        assert_eq!(report.total, 14);
        assert_eq!(report.created, 13);
        assert_eq!(report.errors, 1);

        let failed = report
            .results
            .iter()
            .find(|r| r.barcode == "1234567890003");

        assert!(
            matches!(
                failed.map(|r| &r.outcome),
                Some(SeedOutcome::Error { message }) if message.starts_with("failed to create product")
            ),
            "expected an error outcome, got {failed:?}"
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_recorded_without_insert() {
        let mut products = MockProductsService::new();

        products
            .expect_find_product_by_barcode()
            .returning(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));
        products.expect_create_product().never();

        let report = CatalogSeedService::new(Arc::new(products))
            .seed_products()
            .await;

        assert_eq!(report.errors, 14);
        assert_eq!(report.created, 0);
    }
}
