//! Products service.

use async_trait::async_trait;
use cellar::{inventory::InventorySummary, products::CatalogFilter};
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: CatalogFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());

        let products = self
            .repository
            .list_products(&mut tx, filter.category, search)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn find_product_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .find_product_by_barcode(&mut tx, barcode.trim())
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.normalized()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        debug!(product = %created.uuid, barcode = %created.barcode, "created product");

        Ok(created)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn inventory_summary(&self) -> Result<InventorySummary, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let levels = self.repository.list_stock_levels(&mut tx).await?;

        tx.commit().await?;

        Ok(InventorySummary::from_levels(levels))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Lists products matching the filter, ordered by name.
    async fn list_products(
        &self,
        filter: CatalogFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Look a product up by its barcode.
    async fn find_product_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<ProductRecord>, ProductsServiceError>;

    /// Creates a new product. Barcodes are unique.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Permanently deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Product count, low-stock count and stock value.
    async fn inventory_summary(&self) -> Result<InventorySummary, ProductsServiceError>;
}
