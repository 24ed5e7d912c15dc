use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DEFAULT_TRAILING_DAYS: i64 = 29;

/// A closed reporting window, clamped to whole days: `start` at
/// 00:00:00.000 and `end` at 23:59:59.999.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportRange {
    /// Permissive resolution: a missing or unparseable bound falls back to
    /// the trailing 30-day window, and inverted bounds are swapped.
    /// Malformed input never fails a report.
    pub fn resolve(start: Option<&str>, end: Option<&str>) -> Self {
        Self::resolve_at(Utc::now().date_naive(), start, end)
    }

    pub fn resolve_at(today: NaiveDate, start: Option<&str>, end: Option<&str>) -> Self {
        let end_day = end.and_then(parse_day).unwrap_or(today);
        let start_day = start
            .and_then(parse_day)
            .unwrap_or_else(|| today - Duration::days(DEFAULT_TRAILING_DAYS));

        let (start_day, end_day) = if start_day > end_day {
            (end_day, start_day)
        } else {
            (start_day, end_day)
        };

        Self {
            start: start_of_day(start_day),
            end: end_of_day(end_day),
        }
    }

    /// The contiguous window of equal length ending exactly 1ms before
    /// this one starts.
    pub fn previous(&self) -> Self {
        let duration = std::cmp::max(self.end - self.start, Duration::milliseconds(1));
        let end = self.start - Duration::milliseconds(1);

        Self {
            start: end - duration,
            end,
        }
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .map(|at| at.date_naive())
                .ok()
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map(|at| at.date())
                .ok()
        })
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        raw.parse().unwrap()
    }

    fn datetime(raw: &str) -> NaiveDateTime {
        raw.parse().unwrap()
    }

    #[test]
    fn should_clamp_bounds_to_whole_days() {
        let range = ReportRange::resolve_at(
            date("2024-06-15"),
            Some("2024-01-05"),
            Some("2024-01-10"),
        );

        assert_eq!(range.start, datetime("2024-01-05T00:00:00"));
        assert_eq!(range.end, datetime("2024-01-10T23:59:59.999"));
    }

    #[test]
    fn should_resolve_identically_on_repeat() {
        let today = date("2024-06-15");
        let first = ReportRange::resolve_at(today, Some("2024-01-05"), Some("2024-01-10"));
        let second = ReportRange::resolve_at(today, Some("2024-01-05"), Some("2024-01-10"));

        assert_eq!(first, second);
    }

    #[test]
    fn should_swap_inverted_bounds() {
        let today = date("2024-06-15");
        let forward = ReportRange::resolve_at(today, Some("2024-01-05"), Some("2024-01-10"));
        let reversed = ReportRange::resolve_at(today, Some("2024-01-10"), Some("2024-01-05"));

        assert_eq!(forward, reversed);
    }

    #[test]
    fn should_default_to_trailing_thirty_days() {
        let range = ReportRange::resolve_at(date("2024-06-30"), None, None);

        assert_eq!(range.start, datetime("2024-06-01T00:00:00"));
        assert_eq!(range.end, datetime("2024-06-30T23:59:59.999"));
    }

    #[test]
    fn should_fall_back_on_unparseable_input() {
        let garbage = ReportRange::resolve_at(date("2024-06-30"), Some("not-a-date"), Some("soon"));
        let defaulted = ReportRange::resolve_at(date("2024-06-30"), None, None);

        assert_eq!(garbage, defaulted);
    }

    #[test]
    fn should_default_only_the_missing_bound() {
        let range = ReportRange::resolve_at(date("2024-06-30"), Some("2024-06-20"), None);

        assert_eq!(range.start, datetime("2024-06-20T00:00:00"));
        assert_eq!(range.end, datetime("2024-06-30T23:59:59.999"));
    }

    #[test]
    fn should_accept_rfc3339_timestamps() {
        let range = ReportRange::resolve_at(
            date("2024-06-15"),
            Some("2024-01-05T10:30:00Z"),
            Some("2024-01-10T00:00:00Z"),
        );

        assert_eq!(range.start, datetime("2024-01-05T00:00:00"));
        assert_eq!(range.end, datetime("2024-01-10T23:59:59.999"));
    }

    #[test]
    fn should_compute_contiguous_equal_length_previous_period() {
        let range = ReportRange::resolve_at(
            date("2024-06-15"),
            Some("2024-01-01"),
            Some("2024-01-31"),
        );
        let previous = range.previous();

        assert_eq!(previous.end, datetime("2023-12-31T23:59:59.999"));
        assert_eq!(previous.start, datetime("2023-12-01T00:00:00"));
        assert_eq!(previous.end - previous.start, range.end - range.start);
        assert_eq!(
            range.start - previous.end,
            chrono::Duration::milliseconds(1)
        );
    }
}
