use super::types::{request, response};
use crate::modules::analytics::{
    engine::{filters, report::Scope},
    service::{run_report, ReportRequest},
};
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let filters_in = payload.filters;

    run_report(
        ctx,
        ReportRequest {
            scope: Scope::Admin,
            seller_id: None,
            start_date: filters_in.start_date,
            end_date: filters_in.end_date,
            interval: filters_in.interval,
            statuses: filters::parse_list(filters_in.status.as_deref()),
            payment_methods: filters::parse_list(filters_in.payment_methods.as_deref()),
            categories: filters::parse_list(filters_in.categories.as_deref()),
            seller_ids: filters::parse_seller_ids(filters_in.sellers.as_deref()),
        },
    )
    .await
    .map(|report| response::Success::Report(Box::new(report)))
    .map_err(|_| response::Error::FailedToLoadAnalytics)
}
