//! Business-timezone time helpers
//!
//! Ticket counters are keyed by the calendar day at the counter, not UTC:
//! an order placed at 23:30 local belongs to the local day even when UTC has
//! already rolled over. Handlers compute the day key once and pass plain
//! `i64` keys down; repositories never touch timezones.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Current calendar day in the business timezone, as a `yyyymmdd` key
pub fn day_key(tz: Tz) -> i64 {
    day_key_for(Utc::now().with_timezone(&tz).date_naive())
}

/// Day key for an arbitrary date
pub fn day_key_for(date: NaiveDate) -> i64 {
    (date.year() as i64) * 10_000 + (date.month() as i64) * 100 + date.day() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_key_layout() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(day_key_for(date), 20260806);
    }

    #[test]
    fn test_day_key_single_digit_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(day_key_for(date), 20250109);
    }
}
