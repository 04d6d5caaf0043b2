//! Assignment of events to calendar days in the viewer's zone.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, TimeZone};
use tracing::debug;

use crate::types::CalendarEvent;

/// Events of one month keyed by day of month, each list sorted by start.
pub type Buckets<'a> = BTreeMap<u32, Vec<&'a CalendarEvent>>;

/// Layouts accepted after a `Z` suffix has been stripped.
const UTC_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision layouts with a numeric offset (RFC 3339 requires seconds).
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parse a timestamp carrying zone information.
///
/// Accepts RFC 3339 and minute precision (`2024-01-15T09:00Z`,
/// `2024-01-15T09:00+03:00`). Timestamps without a zone are rejected.
pub fn parse_instant(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    if let Some(naive) = s.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        return UTC_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
            .map(|dt| dt.and_utc().fixed_offset());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
}

pub fn resolve_start(event: &CalendarEvent) -> Option<DateTime<FixedOffset>> {
    parse_instant(&event.start)
}

/// Group `events` into the days of `(year, month)` as seen in `tz`.
///
/// Events starting in another month are skipped. Events whose start cannot be
/// resolved are dropped from every bucket without affecting the rest. Within a
/// day, events are ordered by start instant; equal starts keep input order.
pub fn bucket_events<'a, Tz: TimeZone>(
    events: &'a [CalendarEvent],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Buckets<'a> {
    let mut days: BTreeMap<u32, Vec<(DateTime<FixedOffset>, &'a CalendarEvent)>> =
        BTreeMap::new();

    for event in events {
        let Some(start) = resolve_start(event) else {
            debug!(id = %event.id, start = %event.start, "skipping event with unresolvable start");
            continue;
        };
        let utc = start.naive_utc();
        let offset = tz.offset_from_utc_datetime(&utc).fix();
        let Some(local) = utc.checked_add_offset(offset) else {
            debug!(id = %event.id, start = %event.start, "skipping event outside the viewer's date range");
            continue;
        };
        let date = local.date();
        if date.year() != year || date.month0() != month {
            continue;
        }
        days.entry(date.day()).or_default().push((start, event));
    }

    days.into_iter()
        .map(|(day, mut list)| {
            // sort_by_key is stable: ties stay in input order
            list.sort_by_key(|(start, _)| *start);
            (day, list.into_iter().map(|(_, event)| event).collect())
        })
        .collect()
}
