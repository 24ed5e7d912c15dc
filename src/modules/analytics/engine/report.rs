use super::bucket::Interval;
use super::facets::{
    self, CategorySlice, CustomerSegments, CustomerSlice, OrderRow, PaymentMethodSlice,
    ProductSlice, SellerSlice, StatusSlice, Summary, TimeBucket,
};
use super::growth::{self, Growth};
use super::range::ReportRange;
use super::record::ReportRecord;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

pub const TOP_PRODUCTS_LIMIT: usize = 10;
pub const TOP_CUSTOMERS_LIMIT: usize = 15;
const ADMIN_ORDERS_REPORT_LIMIT: usize = 200;
const SELLER_ORDERS_REPORT_LIMIT: usize = 100;

/// The seller-identity restriction of a report. Record-level scoping is
/// applied by the base query; this only steers the admin-only facets and
/// the preview size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Admin,
    Seller,
}

impl Scope {
    fn is_admin(&self) -> bool {
        matches!(self, Scope::Admin)
    }

    fn orders_report_limit(&self) -> usize {
        match self {
            Scope::Admin => ADMIN_ORDERS_REPORT_LIMIT,
            Scope::Seller => SELLER_ORDERS_REPORT_LIMIT,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerOption {
    pub seller_id: String,
    pub display_name: String,
    pub status: String,
}

/// The full filterable universe for the scope, independent of whatever
/// filters the current request applied.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFilters {
    pub statuses: Vec<String>,
    pub payment_methods: Vec<String>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sellers: Option<Vec<SellerOption>>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub interval: Interval,
}

#[derive(Clone, Debug, Default)]
pub struct CustomerProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Display data merged into facet rows by the shaper; keyed by user id.
#[derive(Clone, Debug, Default)]
pub struct ProfileDirectory {
    pub seller_names: HashMap<String, String>,
    pub customers: HashMap<String, CustomerProfile>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: Summary,
    pub orders_over_time: Vec<TimeBucket>,
    pub status_distribution: Vec<StatusSlice>,
    pub payment_methods: Vec<PaymentMethodSlice>,
    pub top_products: Vec<ProductSlice>,
    pub category_performance: Vec<CategorySlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_performance: Option<Vec<SellerSlice>>,
    pub customer_segments: CustomerSegments,
    pub orders_report: Vec<OrderRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_customers: Option<Vec<CustomerSlice>>,
    pub growth: Growth,
    pub available_filters: AvailableFilters,
    pub meta: ReportMeta,
}

/// Fans the shared record set out into every facet and shapes the final
/// response. All facets observe the same records; the previous-period set
/// only feeds the growth numbers.
pub fn assemble(
    records: &[ReportRecord],
    previous: &[ReportRecord],
    scope: Scope,
    range: &ReportRange,
    interval: Interval,
    available_filters: AvailableFilters,
    profiles: &ProfileDirectory,
) -> Report {
    let summary = facets::summarize(records);
    let previous_summary = facets::summarize(previous);
    let growth = growth::growth_between(&summary, &previous_summary);

    let seller_performance = scope.is_admin().then(|| {
        facets::seller_performance(records)
            .into_iter()
            .map(|mut slice| {
                if let Some(name) = profiles.seller_names.get(&slice.seller_id) {
                    slice.display_name = name.clone();
                }
                slice
            })
            .collect()
    });

    let top_customers = scope.is_admin().then(|| {
        facets::top_customers(records, TOP_CUSTOMERS_LIMIT)
            .into_iter()
            .map(|mut slice| {
                if let Some(profile) = profiles.customers.get(&slice.customer_id) {
                    slice.name = profile.name.clone();
                    slice.email = profile.email.clone();
                    slice.phone_number = profile.phone_number.clone();
                }
                slice
            })
            .collect()
    });

    Report {
        orders_over_time: facets::orders_over_time(records, interval),
        status_distribution: facets::status_distribution(records),
        payment_methods: facets::payment_method_distribution(records),
        top_products: facets::top_products(records, TOP_PRODUCTS_LIMIT),
        category_performance: facets::category_performance(records),
        customer_segments: facets::customer_segments(records, range),
        orders_report: facets::orders_report(records, scope.orders_report_limit()),
        seller_performance,
        top_customers,
        summary,
        growth,
        available_filters,
        meta: ReportMeta {
            start_date: range.start,
            end_date: range.end,
            interval,
        },
    }
}

/// The all-zero report returned when a category filter matches no
/// products. Available filters stay populated so the caller can recover.
pub fn empty(
    scope: Scope,
    range: &ReportRange,
    interval: Interval,
    available_filters: AvailableFilters,
) -> Report {
    assemble(
        &[],
        &[],
        scope,
        range,
        interval,
        available_filters,
        &ProfileDirectory::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> ReportRange {
        ReportRange::resolve_at(
            "2024-06-15".parse().unwrap(),
            Some("2024-01-01"),
            Some("2024-01-31"),
        )
    }

    #[test]
    fn should_zero_every_facet_on_the_short_circuit_report() {
        let report = empty(
            Scope::Admin,
            &january(),
            Interval::Day,
            AvailableFilters::default(),
        );

        assert_eq!(report.summary, Summary::default());
        assert!(report.orders_over_time.is_empty());
        assert!(report.status_distribution.is_empty());
        assert!(report.payment_methods.is_empty());
        assert!(report.top_products.is_empty());
        assert!(report.category_performance.is_empty());
        assert_eq!(report.seller_performance, Some(vec![]));
        assert_eq!(report.customer_segments, CustomerSegments::default());
        assert!(report.orders_report.is_empty());
        assert_eq!(report.top_customers, Some(vec![]));
        assert_eq!(report.growth, Growth::default());
    }

    #[test]
    fn should_omit_admin_only_facets_for_seller_scope() {
        let report = empty(
            Scope::Seller,
            &january(),
            Interval::Week,
            AvailableFilters::default(),
        );

        assert!(report.seller_performance.is_none());
        assert!(report.top_customers.is_none());
        assert_eq!(report.meta.interval, Interval::Week);
        assert_eq!(report.meta.start_date, january().start);
        assert_eq!(report.meta.end_date, january().end);
    }
}
