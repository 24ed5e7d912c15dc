use crate::modules::order::repository::SaleRecord;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;

pub const UNKNOWN: &str = "unknown";
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Debug)]
pub struct ReportLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: BigDecimal,
    pub category: String,
}

/// A fully normalized base record: every facet reducer consumes these.
/// All defaulting happens here, exactly once — nulls never reach the
/// reducers.
#[derive(Clone, Debug)]
pub struct ReportRecord {
    pub order_id: String,
    pub order_number: String,
    pub seller_id: String,
    pub customer_id: Option<String>,
    pub status: String,
    pub payment_method: String,
    pub order_date: NaiveDateTime,
    pub total_amount: BigDecimal,
    pub unit_count: i64,
    pub categories: Vec<String>,
    pub lines: Vec<ReportLine>,
}

impl From<SaleRecord> for ReportRecord {
    fn from(record: SaleRecord) -> Self {
        let lines: Vec<ReportLine> = record
            .lines
            .into_iter()
            .map(|line| ReportLine {
                product_id: non_blank(line.product_id, UNKNOWN),
                product_name: non_blank(line.product_name, UNKNOWN),
                quantity: line.quantity,
                total_price: line.total_price.unwrap_or_default(),
                category: non_blank(line.category, UNCATEGORIZED),
            })
            .collect();

        let mut categories: Vec<String> = vec![];
        for line in &lines {
            if !categories.contains(&line.category) {
                categories.push(line.category.clone());
            }
        }

        ReportRecord {
            order_id: record.order_id,
            order_number: record.order_number,
            seller_id: record.seller_id,
            customer_id: record.customer_id,
            status: non_blank(record.status, UNKNOWN),
            payment_method: non_blank(record.payment_method, UNKNOWN),
            order_date: record.order_date,
            total_amount: record.total_amount.unwrap_or_default(),
            unit_count: lines.iter().map(|line| line.quantity).sum(),
            categories,
            lines,
        }
    }
}

fn non_blank(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
