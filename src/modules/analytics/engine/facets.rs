use super::bucket::Interval;
use super::range::ReportRange;
use super::record::{ReportRecord, UNKNOWN};
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// Every facet is a pure reducer over the shared, already-filtered record
// set. Nothing here touches the database.

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_orders: i64,
    pub total_revenue: BigDecimal,
    pub total_units: i64,
    pub unique_customers: i64,
    pub average_order_value: f64,
}

pub fn summarize(records: &[ReportRecord]) -> Summary {
    let total_orders = records.len() as i64;
    let total_revenue = records
        .iter()
        .fold(BigDecimal::default(), |acc, record| {
            acc + record.total_amount.clone()
        });
    let total_units: i64 = records.iter().map(|record| record.unit_count).sum();
    let unique_customers = records
        .iter()
        .map(|record| record.customer_id.as_deref().unwrap_or(UNKNOWN))
        .unique()
        .count() as i64;

    Summary {
        total_orders,
        average_order_value: ratio(&total_revenue, total_orders),
        total_revenue,
        total_units,
        unique_customers,
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub period: String,
    pub orders: i64,
    pub revenue: BigDecimal,
    pub units: i64,
    pub average_order_value: f64,
}

pub fn orders_over_time(records: &[ReportRecord], interval: Interval) -> Vec<TimeBucket> {
    struct Acc {
        sort_key: NaiveDate,
        orders: i64,
        revenue: BigDecimal,
        units: i64,
    }

    let mut buckets: HashMap<String, Acc> = HashMap::new();

    for record in records {
        let entry = buckets
            .entry(interval.label(record.order_date))
            .or_insert_with(|| Acc {
                sort_key: interval.sort_key(record.order_date),
                orders: 0,
                revenue: BigDecimal::default(),
                units: 0,
            });
        entry.orders += 1;
        entry.revenue += record.total_amount.clone();
        entry.units += record.unit_count;
    }

    buckets
        .into_iter()
        .sorted_by_key(|(_, acc)| acc.sort_key)
        .map(|(period, acc)| TimeBucket {
            period,
            orders: acc.orders,
            average_order_value: ratio(&acc.revenue, acc.orders),
            revenue: acc.revenue,
            units: acc.units,
        })
        .collect()
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusSlice {
    pub status: String,
    pub orders: i64,
    pub revenue: BigDecimal,
}

pub fn status_distribution(records: &[ReportRecord]) -> Vec<StatusSlice> {
    let mut slices: HashMap<String, (i64, BigDecimal)> = HashMap::new();

    for record in records {
        let entry = slices
            .entry(record.status.clone())
            .or_insert((0, BigDecimal::default()));
        entry.0 += 1;
        entry.1 += record.total_amount.clone();
    }

    let mut slices: Vec<StatusSlice> = slices
        .into_iter()
        .map(|(status, (orders, revenue))| StatusSlice {
            status,
            orders,
            revenue,
        })
        .collect();
    slices.sort_by(|a, b| b.orders.cmp(&a.orders).then(a.status.cmp(&b.status)));
    slices
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSlice {
    pub payment_method: String,
    pub orders: i64,
    pub revenue: BigDecimal,
}

pub fn payment_method_distribution(records: &[ReportRecord]) -> Vec<PaymentMethodSlice> {
    let mut slices: HashMap<String, (i64, BigDecimal)> = HashMap::new();

    for record in records {
        let entry = slices
            .entry(record.payment_method.clone())
            .or_insert((0, BigDecimal::default()));
        entry.0 += 1;
        entry.1 += record.total_amount.clone();
    }

    let mut slices: Vec<PaymentMethodSlice> = slices
        .into_iter()
        .map(|(payment_method, (orders, revenue))| PaymentMethodSlice {
            payment_method,
            orders,
            revenue,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then(a.payment_method.cmp(&b.payment_method))
    });
    slices
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSlice {
    pub product_id: String,
    pub product_name: String,
    pub units: i64,
    pub revenue: BigDecimal,
}

pub fn top_products(records: &[ReportRecord], limit: usize) -> Vec<ProductSlice> {
    let mut products: HashMap<String, (String, i64, BigDecimal)> = HashMap::new();

    for record in records {
        for line in &record.lines {
            let entry = products
                .entry(line.product_id.clone())
                .or_insert_with(|| (line.product_name.clone(), 0, BigDecimal::default()));
            entry.1 += line.quantity;
            entry.2 += line.total_price.clone();
        }
    }

    let mut slices: Vec<ProductSlice> = products
        .into_iter()
        .map(|(product_id, (product_name, units, revenue))| ProductSlice {
            product_id,
            product_name,
            units,
            revenue,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then(a.product_id.cmp(&b.product_id))
    });
    slices.truncate(limit);
    slices
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category: String,
    pub revenue: BigDecimal,
    pub units: i64,
    pub orders: i64,
}

pub fn category_performance(records: &[ReportRecord]) -> Vec<CategorySlice> {
    struct Acc {
        revenue: BigDecimal,
        units: i64,
        orders: HashSet<String>,
    }

    let mut categories: HashMap<String, Acc> = HashMap::new();

    for record in records {
        for line in &record.lines {
            let entry = categories
                .entry(line.category.clone())
                .or_insert_with(|| Acc {
                    revenue: BigDecimal::default(),
                    units: 0,
                    orders: HashSet::new(),
                });
            entry.revenue += line.total_price.clone();
            entry.units += line.quantity;
            entry.orders.insert(record.order_id.clone());
        }
    }

    let mut slices: Vec<CategorySlice> = categories
        .into_iter()
        .map(|(category, acc)| CategorySlice {
            category,
            revenue: acc.revenue,
            units: acc.units,
            orders: acc.orders.len() as i64,
        })
        .collect();
    slices.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.category.cmp(&b.category)));
    slices
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerStatusBreakdown {
    pub status: String,
    pub orders: i64,
    pub revenue: BigDecimal,
    pub units: i64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerSlice {
    pub seller_id: String,
    pub display_name: String,
    pub orders: i64,
    pub revenue: BigDecimal,
    pub units: i64,
    pub status_breakdown: Vec<SellerStatusBreakdown>,
}

/// Two-stage grouping: first by (seller, status), then collapsed to
/// per-seller totals with the status breakdown preserved. Display names
/// default to the raw seller id until the shaper merges profiles.
pub fn seller_performance(records: &[ReportRecord]) -> Vec<SellerSlice> {
    let mut per_status: HashMap<(String, String), (i64, BigDecimal, i64)> = HashMap::new();

    for record in records {
        let entry = per_status
            .entry((record.seller_id.clone(), record.status.clone()))
            .or_insert((0, BigDecimal::default(), 0));
        entry.0 += 1;
        entry.1 += record.total_amount.clone();
        entry.2 += record.unit_count;
    }

    let mut sellers: HashMap<String, SellerSlice> = HashMap::new();

    for ((seller_id, status), (orders, revenue, units)) in per_status {
        let slice = sellers
            .entry(seller_id.clone())
            .or_insert_with(|| SellerSlice {
                display_name: seller_id.clone(),
                seller_id,
                orders: 0,
                revenue: BigDecimal::default(),
                units: 0,
                status_breakdown: vec![],
            });
        slice.orders += orders;
        slice.revenue += revenue.clone();
        slice.units += units;
        slice.status_breakdown.push(SellerStatusBreakdown {
            status,
            orders,
            revenue,
            units,
        });
    }

    let mut slices: Vec<SellerSlice> = sellers.into_values().collect();
    for slice in &mut slices {
        slice
            .status_breakdown
            .sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.status.cmp(&b.status)));
    }
    slices.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then(a.seller_id.cmp(&b.seller_id))
    });
    slices
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegments {
    pub total_customers: i64,
    pub repeat_customers: i64,
    pub new_customers: i64,
    pub returning_customers: i64,
    pub average_order_frequency: f64,
    pub average_lifetime_value: f64,
}

pub fn customer_segments(records: &[ReportRecord], range: &ReportRange) -> CustomerSegments {
    struct Acc {
        orders: i64,
        spend: BigDecimal,
        first_order: NaiveDateTime,
    }

    let mut customers: HashMap<String, Acc> = HashMap::new();

    for record in records {
        let key = record
            .customer_id
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());
        let entry = customers.entry(key).or_insert_with(|| Acc {
            orders: 0,
            spend: BigDecimal::default(),
            first_order: record.order_date,
        });
        entry.orders += 1;
        entry.spend += record.total_amount.clone();
        entry.first_order = entry.first_order.min(record.order_date);
    }

    let total_customers = customers.len() as i64;
    let total_orders: i64 = customers.values().map(|acc| acc.orders).sum();
    let total_spend = customers
        .values()
        .fold(BigDecimal::default(), |acc, customer| {
            acc + customer.spend.clone()
        });
    let repeat_customers = customers.values().filter(|acc| acc.orders > 1).count() as i64;
    // Acquired in-period: a single order whose date falls inside the window.
    let new_customers = customers
        .values()
        .filter(|acc| acc.orders == 1 && acc.first_order >= range.start)
        .count() as i64;

    CustomerSegments {
        total_customers,
        repeat_customers,
        new_customers,
        returning_customers: repeat_customers,
        average_order_frequency: if total_customers > 0 {
            total_orders as f64 / total_customers as f64
        } else {
            0.0
        },
        average_lifetime_value: ratio(&total_spend, total_customers),
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub order_number: String,
    pub order_date: NaiveDateTime,
    pub status: String,
    pub payment_method: String,
    pub amount: BigDecimal,
    pub units: i64,
    pub categories: Vec<String>,
}

/// A bounded, date-descending preview of the raw rows, not the full
/// result set.
pub fn orders_report(records: &[ReportRecord], limit: usize) -> Vec<OrderRow> {
    records
        .iter()
        .sorted_by_key(|record| std::cmp::Reverse(record.order_date))
        .take(limit)
        .map(|record| OrderRow {
            order_number: record.order_number.clone(),
            order_date: record.order_date,
            status: record.status.clone(),
            payment_method: record.payment_method.clone(),
            amount: record.total_amount.clone(),
            units: record.unit_count,
            categories: record.categories.clone(),
        })
        .collect()
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSlice {
    pub customer_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub orders: i64,
    pub revenue: BigDecimal,
    pub units: i64,
    pub last_order_date: NaiveDateTime,
}

/// Anonymous orders (no customer id) are excluded here, unlike the
/// summary's distinct-customer count.
pub fn top_customers(records: &[ReportRecord], limit: usize) -> Vec<CustomerSlice> {
    struct Acc {
        orders: i64,
        revenue: BigDecimal,
        units: i64,
        last_order_date: NaiveDateTime,
    }

    let mut customers: HashMap<String, Acc> = HashMap::new();

    for record in records {
        let Some(customer_id) = record.customer_id.clone() else {
            continue;
        };
        let entry = customers.entry(customer_id).or_insert_with(|| Acc {
            orders: 0,
            revenue: BigDecimal::default(),
            units: 0,
            last_order_date: record.order_date,
        });
        entry.orders += 1;
        entry.revenue += record.total_amount.clone();
        entry.units += record.unit_count;
        entry.last_order_date = entry.last_order_date.max(record.order_date);
    }

    let mut slices: Vec<CustomerSlice> = customers
        .into_iter()
        .map(|(customer_id, acc)| CustomerSlice {
            customer_id,
            name: None,
            email: None,
            phone_number: None,
            orders: acc.orders,
            revenue: acc.revenue,
            units: acc.units,
            last_order_date: acc.last_order_date,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then(a.customer_id.cmp(&b.customer_id))
    });
    slices.truncate(limit);
    slices
}

fn ratio(amount: &BigDecimal, count: i64) -> f64 {
    if count > 0 {
        amount.to_f64().unwrap_or(0.0) / count as f64
    } else {
        0.0
    }
}
