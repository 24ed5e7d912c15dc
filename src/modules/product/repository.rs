use sqlx::PgExecutor;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Resolves a category filter to the concrete product ids it covers.
/// Category is read from the live catalog, so the ids always reflect the
/// products' current categories.
pub async fn find_ids_by_categories<'e, E: PgExecutor<'e>>(
    e: E,
    categories: &[String],
    seller_id: Option<String>,
) -> Result<Vec<String>, Error> {
    sqlx::query_scalar::<_, String>(
        "
        SELECT id FROM products
        WHERE category = ANY($1)
          AND ($2::TEXT IS NULL OR seller_id = $2)
        ",
    )
    .bind(categories)
    .bind(seller_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to resolve product ids for categories: {}",
            err
        );
        Error::UnexpectedError
    })
}

pub async fn list_categories<'e, E: PgExecutor<'e>>(
    e: E,
    seller_id: Option<String>,
) -> Result<Vec<String>, Error> {
    sqlx::query_scalar::<_, String>(
        "
        SELECT DISTINCT category FROM products
        WHERE category IS NOT NULL
          AND ($1::TEXT IS NULL OR seller_id = $1)
        ORDER BY category
        ",
    )
    .bind(seller_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to list product categories: {}",
            err
        );
        Error::UnexpectedError
    })
}
