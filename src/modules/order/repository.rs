use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// One product line of a sub-order, as captured at order time. `category`
/// is the only live field: it is joined from the current catalog, not from
/// the snapshot.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaleLine {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    pub price: Option<BigDecimal>,
    pub total_price: Option<BigDecimal>,
    pub category: Option<String>,
}

/// A sub-order joined to its parent order, the base record of every
/// report. `order_date` comes from the parent order and drives bucketing;
/// the query window is applied to the sub-order's `created_at` AND the
/// parent's `order_date`.
#[derive(Clone, Debug)]
pub struct SaleRecord {
    pub sub_order_id: String,
    pub order_id: String,
    pub order_number: String,
    pub seller_id: String,
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub order_date: NaiveDateTime,
    pub total_amount: Option<BigDecimal>,
    pub lines: Vec<SaleLine>,
}

#[derive(sqlx::FromRow)]
struct SaleRecordRow {
    sub_order_id: String,
    order_id: String,
    order_number: String,
    seller_id: String,
    customer_id: Option<String>,
    status: Option<String>,
    payment_method: Option<String>,
    order_date: NaiveDateTime,
    total_amount: Option<BigDecimal>,
    items: serde_json::Value,
}

impl From<SaleRecordRow> for SaleRecord {
    fn from(row: SaleRecordRow) -> Self {
        let lines = serde_json::from_value::<Vec<SaleLine>>(row.items).unwrap_or_else(|err| {
            tracing::warn!(
                "Discarding malformed item lines on sub-order {}: {}",
                row.sub_order_id,
                err
            );
            vec![]
        });

        SaleRecord {
            sub_order_id: row.sub_order_id,
            order_id: row.order_id,
            order_number: row.order_number,
            seller_id: row.seller_id,
            customer_id: row.customer_id,
            status: row.status,
            payment_method: row.payment_method,
            order_date: row.order_date,
            total_amount: row.total_amount,
            lines,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SaleRecordFilters {
    pub seller_id: Option<String>,
    pub seller_ids: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
    pub payment_methods: Option<Vec<String>>,
    pub product_ids: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Loads the filtered, category-enriched base record set for a report
/// window. A sub-order qualifies when its `created_at` and its parent
/// order's `order_date` both fall inside `[start, end]`; a product-id
/// filter matches a sub-order when any of its lines matches.
pub async fn find_sale_records<'e, E: PgExecutor<'e>>(
    e: E,
    start: NaiveDateTime,
    end: NaiveDateTime,
    filters: SaleRecordFilters,
) -> Result<Vec<SaleRecord>, Error> {
    sqlx::query_as::<_, SaleRecordRow>(
        r#"
        WITH window_sub_orders AS (
            SELECT
                sub_orders.id,
                sub_orders.order_id,
                sub_orders.seller_id,
                sub_orders.status,
                sub_orders.total_amount,
                item.value AS item
            FROM sub_orders
            LEFT JOIN LATERAL JSONB_ARRAY_ELEMENTS(sub_orders.items) AS item(value) ON TRUE
            WHERE sub_orders.created_at BETWEEN $1 AND $2
              AND ($3::TEXT IS NULL OR sub_orders.seller_id = $3)
              AND ($4::TEXT[] IS NULL OR sub_orders.seller_id = ANY($4))
              AND ($5::TEXT[] IS NULL OR sub_orders.status = ANY($5))
              AND ($6::TEXT[] IS NULL OR EXISTS (
                    SELECT 1
                    FROM JSONB_ARRAY_ELEMENTS(sub_orders.items) AS probe(value)
                    WHERE probe.value->>'product_id' = ANY($6)
              ))
        ),
        categorized AS (
            SELECT
                window_sub_orders.id,
                window_sub_orders.order_id,
                window_sub_orders.seller_id,
                window_sub_orders.status,
                window_sub_orders.total_amount,
                window_sub_orders.item IS NOT NULL AS has_line,
                JSONB_BUILD_OBJECT(
                    'product_id', window_sub_orders.item->>'product_id',
                    'product_name', window_sub_orders.item->>'product_name',
                    'quantity', COALESCE((window_sub_orders.item->>'quantity')::BIGINT, 0),
                    'price', window_sub_orders.item->>'price',
                    'total_price', window_sub_orders.item->>'total_price',
                    'category', products.category
                ) AS line
            FROM window_sub_orders
            LEFT JOIN products ON products.id = window_sub_orders.item->>'product_id'
        ),
        joined AS (
            SELECT
                categorized.*,
                orders.order_number,
                orders.user_id AS customer_id,
                orders.payment_method,
                orders.order_date
            FROM categorized
            INNER JOIN orders ON orders.id = categorized.order_id
            WHERE orders.order_date BETWEEN $1 AND $2
              AND ($7::TEXT[] IS NULL OR orders.payment_method = ANY($7))
        )
        SELECT
            joined.id AS sub_order_id,
            joined.order_id,
            joined.order_number,
            joined.seller_id,
            joined.customer_id,
            joined.status,
            joined.payment_method,
            joined.order_date,
            joined.total_amount,
            COALESCE(
                JSONB_AGG(joined.line) FILTER (WHERE joined.has_line),
                '[]'::JSONB
            ) AS items
        FROM joined
        GROUP BY
            joined.id, joined.order_id, joined.order_number, joined.seller_id,
            joined.customer_id, joined.status, joined.payment_method,
            joined.order_date, joined.total_amount
        ORDER BY joined.order_date DESC
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(filters.seller_id)
    .bind(filters.seller_ids)
    .bind(filters.statuses)
    .bind(filters.product_ids)
    .bind(filters.payment_methods)
    .fetch_all(e)
    .await
    .map(|rows| rows.into_iter().map(SaleRecord::from).collect())
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch sale records: {}", err);
        Error::UnexpectedError
    })
}

pub async fn distinct_statuses<'e, E: PgExecutor<'e>>(
    e: E,
    seller_id: Option<String>,
) -> Result<Vec<String>, Error> {
    sqlx::query_scalar::<_, String>(
        "
        SELECT DISTINCT status FROM sub_orders
        WHERE ($1::TEXT IS NULL OR seller_id = $1)
        ORDER BY status
        ",
    )
    .bind(seller_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch distinct sub-order statuses: {}",
            err
        );
        Error::UnexpectedError
    })
}

pub async fn distinct_payment_methods<'e, E: PgExecutor<'e>>(
    e: E,
    seller_id: Option<String>,
) -> Result<Vec<String>, Error> {
    sqlx::query_scalar::<_, String>(
        "
        SELECT DISTINCT COALESCE(orders.payment_method, 'unknown') AS payment_method
        FROM sub_orders
        INNER JOIN orders ON orders.id = sub_orders.order_id
        WHERE ($1::TEXT IS NULL OR sub_orders.seller_id = $1)
        ORDER BY payment_method
        ",
    )
    .bind(seller_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch distinct payment methods: {}",
            err
        );
        Error::UnexpectedError
    })
}
