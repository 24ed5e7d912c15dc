use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

pub enum Error {
    UnexpectedError,
}

#[derive(Serialize, Deserialize)]
pub struct PlatformInfo {
    sellers: i64,
    products: i64,
    orders: i64,
    sub_orders: i64,
}

#[derive(sqlx::FromRow)]
struct OptionalPlatformInfo {
    sellers: Option<i64>,
    products: Option<i64>,
    orders: Option<i64>,
    sub_orders: Option<i64>,
}

pub async fn get_total_resources<'e, E: PgExecutor<'e>>(e: E) -> Result<PlatformInfo, Error> {
    sqlx::query_as::<_, OptionalPlatformInfo>(
        "
        SELECT
            (SELECT COUNT(id) FROM users WHERE role = 'SELLER') AS sellers,
            (SELECT COUNT(id) FROM products) AS products,
            (SELECT COUNT(id) FROM orders) AS orders,
            (SELECT COUNT(id) FROM sub_orders) AS sub_orders
        ",
    )
    .fetch_one(e)
    .await
    .map(|res| PlatformInfo {
        sellers: res.sellers.unwrap_or(0),
        products: res.products.unwrap_or(0),
        orders: res.orders.unwrap_or(0),
        sub_orders: res.sub_orders.unwrap_or(0),
    })
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch info from tables: {}",
            err
        );
        Error::UnexpectedError
    })
}
