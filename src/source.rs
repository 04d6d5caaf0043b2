//! File-backed event source.
//!
//! Reads a JSON array of events:
//! ```json
//! [{"id": "t1", "kind": "training", "title": "U12 practice",
//!   "start": "2024-01-15T17:00:00+03:00", "end": "2024-01-15T18:30:00+03:00",
//!   "group": "U12"}]
//! ```

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::CalendarEvent;

/// Load events from a JSON file.
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<CalendarEvent>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = read_events(std::io::BufReader::new(file))?;
    debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

/// Read events from any JSON source.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<CalendarEvent>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse events from a JSON string.
pub fn parse_events(json: &str) -> Result<Vec<CalendarEvent>> {
    Ok(serde_json::from_str(json)?)
}
