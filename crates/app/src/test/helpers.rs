//! Test Helpers

use cellar::products::Category;

use crate::{
    domain::{
        products::{data::NewProduct, records::ProductUuid},
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

/// Password given to every user created by these helpers.
pub(crate) const TEST_PASSWORD: &str = "correct horse battery";

/// A beer with ten in stock and no optional details.
pub(crate) fn new_product(uuid: ProductUuid, name: &str, barcode: &str, price: u64) -> NewProduct {
    NewProduct {
        uuid,
        name: name.to_string(),
        barcode: barcode.to_string(),
        category: Category::Beer,
        price,
        stock: 10,
        abv: None,
        description: None,
        image_url: None,
    }
}

pub(crate) fn new_user(uuid: UserUuid, email: &str) -> NewUser {
    NewUser {
        uuid,
        name: "Test Cashier".to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    uuid: UserUuid,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users.create_user(new_user(uuid, email)).await
}
