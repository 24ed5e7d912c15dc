use bigdecimal::BigDecimal;
use std::collections::HashMap;
use vendora_backend_rs::modules::analytics::engine::bucket::Interval;
use vendora_backend_rs::modules::analytics::engine::range::ReportRange;
use vendora_backend_rs::modules::analytics::engine::record::ReportRecord;
use vendora_backend_rs::modules::analytics::engine::report::{
    self, AvailableFilters, CustomerProfile, ProfileDirectory, Scope, SellerOption,
};
use vendora_backend_rs::modules::order::repository::{SaleLine, SaleRecord};

fn sale_line(product_id: &str, quantity: i64, total_price: i64, category: Option<&str>) -> SaleLine {
    SaleLine {
        product_id: Some(product_id.to_string()),
        product_name: Some(format!("Product {}", product_id)),
        quantity,
        price: None,
        total_price: Some(BigDecimal::from(total_price)),
        category: category.map(|value| value.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn sale_record(
    sub_order_id: &str,
    order_id: &str,
    seller_id: &str,
    customer_id: Option<&str>,
    status: &str,
    payment_method: Option<&str>,
    order_date: &str,
    total_amount: Option<i64>,
    lines: Vec<SaleLine>,
) -> SaleRecord {
    SaleRecord {
        sub_order_id: sub_order_id.to_string(),
        order_id: order_id.to_string(),
        order_number: format!("VND-{}", order_id),
        seller_id: seller_id.to_string(),
        customer_id: customer_id.map(|value| value.to_string()),
        status: Some(status.to_string()),
        payment_method: payment_method.map(|value| value.to_string()),
        order_date: order_date.parse().unwrap(),
        total_amount: total_amount.map(BigDecimal::from),
        lines,
    }
}

fn january() -> ReportRange {
    ReportRange::resolve_at(
        "2024-06-15".parse().unwrap(),
        Some("2024-01-01"),
        Some("2024-01-31"),
    )
}

fn enrich(records: Vec<SaleRecord>) -> Vec<ReportRecord> {
    records.into_iter().map(ReportRecord::from).collect()
}

fn seller_scenario() -> Vec<ReportRecord> {
    enrich(vec![
        sale_record(
            "so-1",
            "o-1",
            "s-1",
            Some("c-1"),
            "delivered",
            Some("card"),
            "2024-01-03T09:00:00",
            Some(100),
            vec![sale_line("p-1", 1, 100, Some("Lighting"))],
        ),
        sale_record(
            "so-2",
            "o-2",
            "s-1",
            Some("c-2"),
            "delivered",
            Some("card"),
            "2024-01-10T12:00:00",
            Some(200),
            vec![sale_line("p-2", 2, 200, Some("Decor"))],
        ),
        sale_record(
            "so-3",
            "o-3",
            "s-1",
            Some("c-1"),
            "delivered",
            Some("transfer"),
            "2024-01-21T18:30:00",
            Some(300),
            vec![sale_line("p-1", 3, 300, Some("Lighting"))],
        ),
    ])
}

#[test]
fn seller_report_reflects_the_scoped_records() {
    let records = seller_scenario();
    let report = report::assemble(
        &records,
        &[],
        Scope::Seller,
        &january(),
        Interval::Day,
        AvailableFilters::default(),
        &ProfileDirectory::default(),
    );

    assert_eq!(report.summary.total_orders, 3);
    assert_eq!(report.summary.total_revenue, BigDecimal::from(600));
    assert_eq!(report.summary.average_order_value, 200.0);

    assert_eq!(report.orders_over_time.len(), 3);
    assert!(report.seller_performance.is_none());
    assert!(report.top_customers.is_none());
    assert_eq!(report.orders_report.len(), 3);
    assert_eq!(report.orders_report[0].order_number, "VND-o-3");

    // Both periods empty of a baseline: growth against nothing is +100%.
    assert_eq!(report.growth.revenue, 100.0);
}

#[test]
fn facets_stay_consistent_with_each_other() {
    let records = seller_scenario();
    let report = report::assemble(
        &records,
        &[],
        Scope::Admin,
        &january(),
        Interval::Day,
        AvailableFilters::default(),
        &ProfileDirectory::default(),
    );

    let status_orders: i64 = report
        .status_distribution
        .iter()
        .map(|slice| slice.orders)
        .sum();
    let payment_orders: i64 = report
        .payment_methods
        .iter()
        .map(|slice| slice.orders)
        .sum();
    let bucket_orders: i64 = report
        .orders_over_time
        .iter()
        .map(|bucket| bucket.orders)
        .sum();

    assert_eq!(status_orders, report.summary.total_orders);
    assert_eq!(payment_orders, report.summary.total_orders);
    assert_eq!(bucket_orders, report.summary.total_orders);

    let bucket_revenue = report
        .orders_over_time
        .iter()
        .fold(BigDecimal::from(0), |acc, bucket| {
            acc + bucket.revenue.clone()
        });
    assert_eq!(bucket_revenue, report.summary.total_revenue);

    let seller_revenue = report
        .seller_performance
        .as_ref()
        .unwrap()
        .iter()
        .fold(BigDecimal::from(0), |acc, slice| {
            acc + slice.revenue.clone()
        });
    assert_eq!(seller_revenue, report.summary.total_revenue);
}

#[test]
fn a_status_filtered_record_set_drives_every_facet() {
    // Status filtering happens in the base query; every facet must then
    // reflect only the surviving records.
    let records = enrich(vec![sale_record(
        "so-4",
        "o-4",
        "s-2",
        Some("c-9"),
        "cancelled",
        Some("card"),
        "2024-01-05T10:00:00",
        Some(80),
        vec![sale_line("p-7", 1, 80, Some("Outdoor"))],
    )]);

    let report = report::assemble(
        &records,
        &[],
        Scope::Admin,
        &january(),
        Interval::Day,
        AvailableFilters::default(),
        &ProfileDirectory::default(),
    );

    assert_eq!(report.status_distribution.len(), 1);
    assert_eq!(report.status_distribution[0].status, "cancelled");
    assert!(report
        .top_products
        .iter()
        .all(|slice| slice.product_id == "p-7"));
    assert!(report
        .category_performance
        .iter()
        .all(|slice| slice.category == "Outdoor"));
}

#[test]
fn growth_compares_against_the_previous_period_records() {
    let current = seller_scenario();
    let previous = enrich(vec![sale_record(
        "so-0",
        "o-0",
        "s-1",
        Some("c-1"),
        "delivered",
        Some("card"),
        "2023-12-10T09:00:00",
        Some(400),
        vec![sale_line("p-1", 4, 400, Some("Lighting"))],
    )]);

    let report = report::assemble(
        &current,
        &previous,
        Scope::Seller,
        &january(),
        Interval::Day,
        AvailableFilters::default(),
        &ProfileDirectory::default(),
    );

    // 400 -> 600 revenue, 1 -> 3 orders, 4 -> 6 units.
    assert_eq!(report.growth.revenue, 50.0);
    assert_eq!(report.growth.orders, 200.0);
    assert_eq!(report.growth.units, 50.0);
}

#[test]
fn admin_report_merges_profile_directories() {
    let records = seller_scenario();

    let mut seller_names = HashMap::new();
    seller_names.insert("s-1".to_string(), "Acme".to_string());
    let mut customers = HashMap::new();
    customers.insert(
        "c-1".to_string(),
        CustomerProfile {
            name: Some("Ada Obi".to_string()),
            email: Some("ada@example.com".to_string()),
            phone_number: None,
        },
    );

    let report = report::assemble(
        &records,
        &[],
        Scope::Admin,
        &january(),
        Interval::Day,
        AvailableFilters {
            statuses: vec!["delivered".to_string()],
            payment_methods: vec!["card".to_string(), "transfer".to_string()],
            categories: vec!["Decor".to_string(), "Lighting".to_string()],
            sellers: Some(vec![SellerOption {
                seller_id: "s-1".to_string(),
                display_name: "Acme".to_string(),
                status: "ACTIVE".to_string(),
            }]),
        },
        &ProfileDirectory {
            seller_names,
            customers,
        },
    );

    let sellers = report.seller_performance.unwrap();
    assert_eq!(sellers[0].display_name, "Acme");

    let top_customers = report.top_customers.unwrap();
    assert_eq!(top_customers[0].customer_id, "c-1");
    assert_eq!(top_customers[0].name.as_deref(), Some("Ada Obi"));
    // No profile on record: the row keeps bare aggregates.
    assert!(top_customers[1].name.is_none());

    assert_eq!(report.available_filters.statuses, vec!["delivered"]);
}

#[test]
fn null_amounts_and_missing_lines_never_poison_the_sums() {
    let records = enrich(vec![
        sale_record(
            "so-1",
            "o-1",
            "s-1",
            None,
            "delivered",
            None,
            "2024-01-03T09:00:00",
            None,
            vec![SaleLine {
                product_id: None,
                product_name: None,
                quantity: 0,
                price: None,
                total_price: None,
                category: None,
            }],
        ),
        sale_record(
            "so-2",
            "o-2",
            "s-1",
            Some("c-1"),
            "delivered",
            Some("card"),
            "2024-01-04T09:00:00",
            Some(50),
            vec![],
        ),
    ]);

    let report = report::assemble(
        &records,
        &[],
        Scope::Admin,
        &january(),
        Interval::Day,
        AvailableFilters::default(),
        &ProfileDirectory::default(),
    );

    assert_eq!(report.summary.total_orders, 2);
    assert_eq!(report.summary.total_revenue, BigDecimal::from(50));
    assert!(report.summary.average_order_value.is_finite());
    assert_eq!(report.summary.average_order_value, 25.0);

    let unknown = report
        .payment_methods
        .iter()
        .find(|slice| slice.payment_method == "unknown")
        .unwrap();
    assert_eq!(unknown.orders, 1);
}

#[test]
fn empty_category_match_short_circuits_to_a_zeroed_report() {
    let available = AvailableFilters {
        statuses: vec!["delivered".to_string()],
        payment_methods: vec!["card".to_string()],
        categories: vec!["Lighting".to_string()],
        sellers: None,
    };

    let report = report::empty(Scope::Seller, &january(), Interval::Day, available);

    assert_eq!(report.summary.total_orders, 0);
    assert_eq!(report.summary.total_revenue, BigDecimal::from(0));
    assert!(report.orders_over_time.is_empty());
    assert!(report.top_products.is_empty());
    assert!(report.orders_report.is_empty());
    assert_eq!(report.growth.revenue, 0.0);
    // The filterable universe is still reported so the caller can recover.
    assert_eq!(report.available_filters.categories, vec!["Lighting"]);
}
