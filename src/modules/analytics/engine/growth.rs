use super::facets::Summary;
use bigdecimal::ToPrimitive;
use serde::Serialize;

/// Period-over-period change, in percent, for the three headline metrics.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Growth {
    pub revenue: f64,
    pub orders: f64,
    pub units: f64,
}

pub fn growth_between(current: &Summary, previous: &Summary) -> Growth {
    Growth {
        revenue: pct(
            current.total_revenue.to_f64().unwrap_or(0.0),
            previous.total_revenue.to_f64().unwrap_or(0.0),
        ),
        orders: pct(current.total_orders as f64, previous.total_orders as f64),
        units: pct(current.total_units as f64, previous.total_units as f64),
    }
}

fn pct(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        // New activity against an empty baseline is reported as a flat
        // +100%, not an infinite percentage.
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn summary(orders: i64, revenue: i64, units: i64) -> Summary {
        Summary {
            total_orders: orders,
            total_revenue: BigDecimal::from(revenue),
            total_units: units,
            unique_customers: 0,
            average_order_value: 0.0,
        }
    }

    #[test]
    fn should_compute_relative_growth_against_a_nonzero_baseline() {
        let growth = growth_between(&summary(30, 1500, 60), &summary(20, 1000, 80));

        assert_eq!(growth.revenue, 50.0);
        assert_eq!(growth.orders, 50.0);
        assert_eq!(growth.units, -25.0);
    }

    #[test]
    fn should_cap_growth_from_an_empty_baseline_at_one_hundred() {
        let growth = growth_between(&summary(5, 500, 5), &summary(0, 0, 0));

        assert_eq!(growth.revenue, 100.0);
        assert_eq!(growth.orders, 100.0);
        assert_eq!(growth.units, 100.0);
    }

    #[test]
    fn should_report_zero_growth_when_both_periods_are_empty() {
        let growth = growth_between(&summary(0, 0, 0), &summary(0, 0, 0));

        assert_eq!(growth, Growth::default());
    }
}
