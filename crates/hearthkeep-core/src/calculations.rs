//! Time and quantity helpers shared by every other component.

use chrono::{DateTime, Local, NaiveDate};

/// Days of supply left for `quantity` at `daily_usage` per day, rounded to
/// one decimal place.
///
/// A non-finite or negative quantity yields `0.0`. A non-finite or
/// non-positive usage rate means the item never runs out and yields
/// `f64::INFINITY`.
pub fn days_remaining(quantity: f64, daily_usage: f64) -> f64 {
    if !quantity.is_finite() || quantity < 0.0 {
        return 0.0;
    }
    if !daily_usage.is_finite() || daily_usage <= 0.0 {
        return f64::INFINITY;
    }
    ((quantity / daily_usage) * 10.0).round() / 10.0
}

/// Whole calendar days from `today` until `date`.
///
/// `None` means unscheduled (infinitely far away). Past dates are negative,
/// today is zero.
pub fn days_until_from(date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    date.map(|target| (target - today).num_days())
}

/// [`days_until_from`] against the local calendar date.
pub fn days_until(date: Option<NaiveDate>) -> Option<i64> {
    days_until_from(date, today())
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date or an RFC 3339 timestamp.
///
/// Anything else (including the empty string) is `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
