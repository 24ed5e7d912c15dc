use super::engine::bucket::Interval;
use super::engine::facets;
use super::engine::filters::{self, ProductFilter};
use super::engine::range::ReportRange;
use super::engine::record::ReportRecord;
use super::engine::report::{
    self, AvailableFilters, CustomerProfile, ProfileDirectory, Report, Scope, SellerOption,
    TOP_CUSTOMERS_LIMIT,
};
use crate::modules::{order, product, user};
use crate::types::Context;
use std::sync::Arc;

pub enum Error {
    UnexpectedError,
}

pub struct ReportRequest {
    pub scope: Scope,
    /// Fixed seller restriction; always set for seller scope, never for
    /// admin scope.
    pub seller_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub interval: Option<String>,
    pub statuses: Vec<String>,
    pub payment_methods: Vec<String>,
    pub categories: Vec<String>,
    pub seller_ids: Vec<String>,
}

/// Runs the full report: category resolution first (it gates the filter
/// predicate), then the current-period, previous-period and filter-option
/// passes concurrently, then the facet fan-out over the loaded records.
pub async fn run_report(ctx: Arc<Context>, request: ReportRequest) -> Result<Report, Error> {
    let range = ReportRange::resolve(request.start_date.as_deref(), request.end_date.as_deref());
    let interval = Interval::parse(request.interval.as_deref());

    let product_filter = if request.categories.is_empty() {
        ProductFilter::Unfiltered
    } else {
        product::repository::find_ids_by_categories(
            &ctx.db_conn.pool,
            &request.categories,
            request.seller_id.clone(),
        )
        .await
        .map(ProductFilter::Matched)
        .map_err(|_| Error::UnexpectedError)?
    };

    // A category filter that matched nothing must not degrade into "no
    // filter": the report short-circuits to the zeroed response.
    if product_filter.is_empty_match() {
        let available =
            resolve_available_filters(&ctx, request.scope, request.seller_id.clone()).await?;
        return Ok(report::empty(request.scope, &range, interval, available));
    }

    let record_filters = order::repository::SaleRecordFilters {
        seller_id: request.seller_id.clone(),
        seller_ids: filters::non_empty(request.seller_ids),
        statuses: filters::non_empty(request.statuses),
        payment_methods: filters::non_empty(request.payment_methods),
        product_ids: product_filter.into_ids(),
    };
    let previous_range = range.previous();

    let (current, previous, available) = tokio::join!(
        order::repository::find_sale_records(
            &ctx.db_conn.pool,
            range.start,
            range.end,
            record_filters.clone(),
        ),
        order::repository::find_sale_records(
            &ctx.db_conn.pool,
            previous_range.start,
            previous_range.end,
            record_filters.clone(),
        ),
        resolve_available_filters(&ctx, request.scope, request.seller_id.clone()),
    );

    let records: Vec<ReportRecord> = current
        .map_err(|_| Error::UnexpectedError)?
        .into_iter()
        .map(ReportRecord::from)
        .collect();
    let previous_records: Vec<ReportRecord> = previous
        .map_err(|_| Error::UnexpectedError)?
        .into_iter()
        .map(ReportRecord::from)
        .collect();
    let available = available?;

    let profiles = resolve_profiles(&ctx, request.scope, &records, &available).await?;

    Ok(report::assemble(
        &records,
        &previous_records,
        request.scope,
        &range,
        interval,
        available,
        &profiles,
    ))
}

/// The filterable universe for the scope. Deliberately unaffected by the
/// filters applied to the current request: it answers "what could I
/// filter by", not "what did I filter by".
pub async fn resolve_available_filters(
    ctx: &Context,
    scope: Scope,
    seller_id: Option<String>,
) -> Result<AvailableFilters, Error> {
    let sellers = async {
        match scope {
            Scope::Admin => user::repository::find_sellers(&ctx.db_conn.pool)
                .await
                .map(Some),
            Scope::Seller => Ok(None),
        }
    };

    let (statuses, payment_methods, categories, sellers) = tokio::join!(
        order::repository::distinct_statuses(&ctx.db_conn.pool, seller_id.clone()),
        order::repository::distinct_payment_methods(&ctx.db_conn.pool, seller_id.clone()),
        product::repository::list_categories(&ctx.db_conn.pool, seller_id.clone()),
        sellers,
    );

    Ok(AvailableFilters {
        statuses: statuses.map_err(|_| Error::UnexpectedError)?,
        payment_methods: payment_methods.map_err(|_| Error::UnexpectedError)?,
        categories: categories.map_err(|_| Error::UnexpectedError)?,
        sellers: sellers
            .map_err(|_| Error::UnexpectedError)?
            .map(|sellers| {
                sellers
                    .into_iter()
                    .map(|seller| SellerOption {
                        display_name: seller.display_name(),
                        status: seller.status.clone(),
                        seller_id: seller.id,
                    })
                    .collect()
            }),
    })
}

async fn resolve_profiles(
    ctx: &Context,
    scope: Scope,
    records: &[ReportRecord],
    available: &AvailableFilters,
) -> Result<ProfileDirectory, Error> {
    if scope != Scope::Admin {
        return Ok(ProfileDirectory::default());
    }

    let seller_names = available
        .sellers
        .as_ref()
        .map(|sellers| {
            sellers
                .iter()
                .map(|seller| (seller.seller_id.clone(), seller.display_name.clone()))
                .collect()
        })
        .unwrap_or_default();

    let customer_ids: Vec<String> = facets::top_customers(records, TOP_CUSTOMERS_LIMIT)
        .into_iter()
        .map(|slice| slice.customer_id)
        .collect();
    let customers = user::repository::find_by_ids(&ctx.db_conn.pool, &customer_ids)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .into_iter()
        .map(|customer| {
            let profile = CustomerProfile {
                name: Some(customer.display_name()),
                email: Some(customer.email.clone()).filter(|email| !email.is_empty()),
                phone_number: Some(customer.phone_number.clone())
                    .filter(|phone| !phone.is_empty()),
            };
            (customer.id, profile)
        })
        .collect();

    Ok(ProfileDirectory {
        seller_names,
        customers,
    })
}
