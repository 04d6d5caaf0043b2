//! Month-grid calendar engine for club schedules (trainings, matches).
//!
//! Features:
//! - Monday-first month grid with leap-year aware day counts
//! - Bucketing of events into days of the viewer's local calendar
//! - Per-day display cap with hidden-event count
//! - Month navigation with year wrap-around and "jump to today"
//! - Terminal view binding driven by a JSON event file

pub mod args;
pub mod bucket;
pub mod calendar;
pub mod error;
pub mod navigation;
pub mod overflow;
pub mod render;
pub mod source;
pub mod types;
pub mod view;
