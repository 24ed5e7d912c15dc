use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

/// Time-series granularity. Parsed permissively: anything other than
/// week/month (any casing) is treated as day.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Week,
    Month,
}

impl Interval {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("week") => Interval::Week,
            Some("month") => Interval::Month,
            _ => Interval::Day,
        }
    }

    /// Human-readable bucket key for an order timestamp. Weeks use the ISO
    /// week-year, which can diverge from the calendar year at year
    /// boundaries.
    pub fn label(&self, at: NaiveDateTime) -> String {
        match self {
            Interval::Day => at.format("%Y-%m-%d").to_string(),
            Interval::Week => {
                let week = at.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Interval::Month => at.format("%Y-%m").to_string(),
        }
    }

    /// Chronological anchor of the bucket containing `at`. Week labels do
    /// not sort correctly across ISO year boundaries, so ordering always
    /// goes through this date.
    pub fn sort_key(&self, at: NaiveDateTime) -> NaiveDate {
        match self {
            Interval::Day => at.date(),
            Interval::Week => {
                let week = at.iso_week();
                NaiveDate::from_isoywd_opt(week.year(), week.week(), Weekday::Mon)
                    .unwrap_or_else(|| at.date())
            }
            Interval::Month => at.date().with_day(1).unwrap_or_else(|| at.date()),
        }
    }
}
