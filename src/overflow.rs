//! Per-day display cap.

use crate::types::CalendarEvent;

/// Number of events shown per day unless the caller asks otherwise.
pub const DEFAULT_OVERFLOW_CAP: usize = 2;

/// The visible part of one day's bucket and how many events were left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overflow<'a, 'e> {
    pub shown: &'a [&'e CalendarEvent],
    pub hidden_count: usize,
}

impl Overflow<'_, '_> {
    pub fn has_hidden(&self) -> bool {
        self.hidden_count > 0
    }
}

/// Keep the first `cap` events of a sorted day bucket.
///
/// `shown` borrows a prefix of `day_events`, so a larger cap on the same day
/// always yields a longer prefix of the same list.
pub fn apply_overflow<'a, 'e>(day_events: &'a [&'e CalendarEvent], cap: usize) -> Overflow<'a, 'e> {
    let visible = day_events.len().min(cap);
    Overflow {
        shown: &day_events[..visible],
        hidden_count: day_events.len() - visible,
    }
}
