//! Type definitions and constants for the calendar engine.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Locale, NaiveDate, Weekday};
use serde::Deserialize;

/// Category of a scheduled event. Used for display only, never for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum EventKind {
    Training,
    Match,
    /// Any category the engine has no dedicated style for.
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Training => "training",
            EventKind::Match => "match",
            EventKind::Other(name) => name,
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "training" => EventKind::Training,
            "match" => EventKind::Match,
            _ => EventKind::Other(s),
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        EventKind::from(s.to_string())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled event as supplied by the event source.
///
/// `start` and `end` are kept exactly as supplied and resolved lazily, so a
/// single malformed timestamp only affects its own event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub group: String,
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<EventKind>,
        title: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        CalendarEvent {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            start: start.into(),
            end: end.into(),
            group: group.into(),
        }
    }
}

/// A populated grid cell (a real day of the month).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Day of month, 1-based.
    pub day: u32,
    pub weekday: Weekday,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// Calendar grid for a single month.
///
/// `cells` holds the leading empty placeholders (`None`) followed by one
/// `Some(DayCell)` per day. The last row may be short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-based month (0 = January).
    pub month: u32,
    pub cells: Vec<Option<DayCell>>,
}

/// Time zone the viewer's calendar is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerZone {
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl FromStr for ViewerZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => return Ok(ViewerZone::Local),
            "utc" | "z" => return Ok(ViewerZone::Utc),
            _ => {}
        }
        s.parse::<FixedOffset>()
            .map(ViewerZone::Fixed)
            .map_err(|_| format!("Invalid time zone: {} (expected local, utc or +HH:MM)", s))
    }
}

/// Cell width mode for the terminal grid.
#[derive(Debug, Clone, Copy)]
pub enum ColumnsMode {
    /// Fixed cell width in characters.
    Fixed(usize),
    /// Derive from terminal width.
    Auto,
}

/// Rendering context containing all display options.
#[derive(Clone, Debug)]
pub struct ViewContext {
    /// Maximum number of events shown per day.
    pub cap: usize,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Cell width mode.
    pub columns: ColumnsMode,
    /// Today's date in the viewer's zone.
    pub today: NaiveDate,
    /// Zone used to localize event start instants.
    pub zone: ViewerZone,
    /// Locale for month and weekday labels.
    pub locale: Locale,
}

// Constants for grid layout
pub const DAYS_PER_WEEK: usize = 7;
pub const MIN_CELL_WIDTH: usize = 6;
pub const MAX_CELL_WIDTH: usize = 24;
pub const DEFAULT_CELL_WIDTH: usize = 12;

// Color is enabled by default for better user experience
pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
