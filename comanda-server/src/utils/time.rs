//! Time helpers for business timezone conversions
//!
//! Entities store timestamps as `i64` Unix millis; "today" checks always go
//! through the configured business timezone.

use chrono::NaiveDate;
use chrono_tz::Tz;

/// Current server time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date in the business timezone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Elapsed whole minutes between two millisecond timestamps, rounded to
/// the nearest minute
pub fn minutes_between(start_millis: i64, end_millis: i64) -> i64 {
    ((end_millis - start_millis) as f64 / 60_000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_between_rounds() {
        assert_eq!(minutes_between(0, 0), 0);
        assert_eq!(minutes_between(0, 60_000), 1);
        // 29s rounds down, 31s rounds up
        assert_eq!(minutes_between(0, 29_000), 0);
        assert_eq!(minutes_between(0, 31_000), 1);
        // 12.5 minutes rounds up
        assert_eq!(minutes_between(0, 750_000), 13);
    }

    #[test]
    fn test_minutes_between_longer_spans() {
        let start = 1_700_000_000_000_i64;
        assert_eq!(minutes_between(start, start + 45 * 60_000), 45);
    }
}
