//! Create Product Handler

use std::sync::Arc;

use cellar::products::Category;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cellar_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub barcode: String,

    /// One of beer, wine, spirits, cider or other
    pub category: String,

    /// Unit price in cents
    pub price: u64,

    pub stock: u32,
    pub abv: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CreateProductRequest {
    fn into_new_product(self, category: Category) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: self.name,
            barcode: self.barcode,
            category,
            price: self.price,
            stock: self.stock,
            abv: self.abv,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Barcode already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;
    let request = json.into_inner();

    let category = request
        .category
        .parse::<Category>()
        .or_400("invalid category")?;

    let product = state
        .app
        .products
        .create_product(request.into_new_product(category))
        .await
        .map_err(into_status_error)?;

    info!(
        product = %product.uuid,
        barcode = %product.barcode,
        user = %current.authenticated.user.uuid,
        "product added to catalog"
    );

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use cellar_app::domain::products::{
        MockProductsService, ProductsServiceError, data::ProductValidationError,
        records::ProductRecord,
    };
    use jiff::Timestamp;

    use crate::test_helpers::{TestState, authenticated_service, storage_error};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        authenticated_service(
            TestState {
                products,
                ..TestState::default()
            },
            Router::with_path("products").post(handler),
        )
    }

    fn body() -> Value {
        json!({
            "name": "Smirnoff Vodka 750ml",
            "barcode": "1234567890010",
            "category": "spirits",
            "price": 120_000,
            "stock": 35,
            "abv": 40.0,
        })
    }

    fn stored(product: NewProduct) -> ProductRecord {
        ProductRecord {
            uuid: product.uuid,
            name: product.name,
            barcode: product.barcode,
            category: product.category,
            price: product.price,
            stock: product.stock,
            abv: product.abv,
            description: product.description,
            image_url: product.image_url,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.name == "Smirnoff Vodka 750ml"
                    && new.barcode == "1234567890010"
                    && new.category == Category::Spirits
                    && new.price == 120_000
                    && new.stock == 35
                    && new.abv == Some(40.0)
            })
            .return_once(|new| Ok(stored(new)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&make_service(products))
            .await;

        let created: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/products/{}", created.uuid).as_str())
        );
        assert_eq!(created.category, "spirits");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_barcode_returns_409() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_returns_400_without_calling_service() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut request = body();
        request["category"] = json!("mead");

        let res = TestClient::post("http://example.com/products")
            .json(&request)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected_by_body_parsing() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut request = body();
        request["price"] = json!(-1);

        let res = TestClient::post("http://example.com/products")
            .json(&request)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_validation_error_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductValidationError::MissingName.into()));

        let res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(storage_error())));

        let res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
