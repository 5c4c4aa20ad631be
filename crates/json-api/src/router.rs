//! App Router

use salvo::Router;

use crate::{auth, products, seed, sessions, transactions};

/// Every API route. Routes behind the auth middleware come first, so
/// `/products/summary` is matched before the public `/products/{product}`.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("sessions/current")
                        .get(sessions::current::handler)
                        .delete(sessions::delete::handler),
                )
                .push(
                    Router::with_path("products")
                        .post(products::create::handler)
                        .push(Router::with_path("summary").get(products::summary::handler))
                        .push(Router::with_path("{product}").delete(products::delete::handler)),
                )
                .push(
                    Router::with_path("transactions")
                        .get(transactions::index::handler)
                        .post(transactions::create::handler)
                        .push(
                            Router::with_path("{transaction}/receipt")
                                .get(transactions::receipt::handler),
                        ),
                )
                .push(Router::with_path("seed").post(seed::handler)),
        )
        .push(
            Router::new()
                .push(Router::with_path("sessions").post(sessions::create::handler))
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .push(Router::with_path("{product}").get(products::get::handler)),
                ),
        )
}
