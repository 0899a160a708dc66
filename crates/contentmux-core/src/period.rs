//! Monthly billing windows

use chrono::{DateTime, Datelike, Days, Months, NaiveTime, Utc};

/// A calendar-month billing window in UTC, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BillingPeriod {
    /// The period containing `now`
    pub fn containing(now: DateTime<Utc>) -> Self {
        let first_day = now.date_naive() - Days::new(u64::from(now.day0()));
        let start = first_day.and_time(NaiveTime::MIN).and_utc();
        let end = (first_day + Months::new(1)).and_time(NaiveTime::MIN).and_utc();
        Self { start, end }
    }

    /// The period containing the current instant
    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    /// Storage key, `YYYY-MM`
    pub fn key(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }

    /// Whether an instant falls inside this period
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_mid_month() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 13, 45, 0).unwrap();
        let period = BillingPeriod::containing(now);
        assert_eq!(period.start, Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(period.end, Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap());
        assert_eq!(period.key(), "2026-10");
        assert!(period.contains(now));
    }

    #[test]
    fn test_period_boundaries() {
        let start = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let period = BillingPeriod::containing(start);
        assert_eq!(period.start, start);
        assert!(period.contains(start));
        assert!(!period.contains(period.end));
        assert_eq!(period.end, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_period_december_rollover() {
        let now = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        let period = BillingPeriod::containing(now);
        assert_eq!(period.key(), "2026-12");
        assert_eq!(period.end, Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }
}
