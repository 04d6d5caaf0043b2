//! Month navigation over `(year, month)` pairs with zero-based months.
//!
//! The pair is the whole navigation state; the caller owns and persists it.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use crate::types::ViewerZone;

/// Environment variable overriding today's date (`YYYY-MM-DD`), used by tests.
pub const TODAY_ENV: &str = "CLUB_CAL_TODAY";

/// Carry an arbitrary month offset into the year so that month lands in 0..11.
///
/// Years outside the `i32` range are clamped to its bounds.
pub fn normalize(year: i32, month: i64) -> (i32, u32) {
    let total = (i64::from(year) * 12).saturating_add(month);
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32;
    let year = i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX });
    (year, month)
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    match month {
        0 => (year.saturating_sub(1), 11),
        1..=11 => (year, month - 1),
        _ => shift_month(year, month, -1),
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    match month {
        11 => (year.saturating_add(1), 0),
        0..=10 => (year, month + 1),
        _ => shift_month(year, month, 1),
    }
}

/// Move `delta` months forward (or backward when negative).
pub fn shift_month(year: i32, month: u32, delta: i64) -> (i32, u32) {
    normalize(year, i64::from(month).saturating_add(delta))
}

pub fn is_current_month(year: i32, month: u32, today: NaiveDate) -> bool {
    year == today.year() && month == today.month0()
}

/// Always today's month, regardless of what is displayed.
pub fn jump_to_today(today: NaiveDate) -> (i32, u32) {
    (today.year(), today.month0())
}

/// Today's date in the given zone, respecting the `CLUB_CAL_TODAY` override.
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    if let Ok(test_time) = std::env::var(TODAY_ENV)
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    Utc::now().with_timezone(tz).date_naive()
}

/// Today's date in a zone chosen at runtime.
pub fn today_for(zone: ViewerZone) -> NaiveDate {
    match zone {
        ViewerZone::Local => today_in(&chrono::Local),
        ViewerZone::Utc => today_in(&Utc),
        ViewerZone::Fixed(offset) => today_in(&offset),
    }
}
