//! Gap input model and "HH:mm" parsing.

use serde::{Deserialize, Serialize};

use super::location::{Location, LocationPreference};

/// A free-time window as supplied by the gap source.
///
/// Bounds are "HH:mm" wall-clock strings. A gap whose bounds do not parse,
/// or whose duration is not positive, is skipped silently during enrichment
/// and never counts toward capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub id: String,
    pub start: String,
    pub end: String,
    /// Explicit label from the caller; wins over neighbor inference.
    #[serde(default)]
    pub location_label: Option<Location>,
}

impl Gap {
    /// Create a new unlabeled gap.
    pub fn new(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            location_label: None,
        }
    }

    /// Attach an explicit location label.
    pub fn with_label(mut self, label: Location) -> Self {
        self.location_label = Some(label);
        self
    }
}

/// A validated gap with minute-of-day bounds and an inferred location label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedGap {
    pub id: String,
    pub start_minute: u32,
    pub end_minute: u32,
    /// Unset means compatible with any location preference.
    pub label: Option<Location>,
}

impl EnrichedGap {
    /// Gap length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end_minute) - i64::from(self.start_minute)
    }

    /// Whether a suggestion with the given preference may be placed here.
    /// A specific preference fits a matching or unlabeled gap.
    pub fn admits(&self, preference: LocationPreference) -> bool {
        match preference.required_label() {
            None => true,
            Some(required) => self.label.map_or(true, |label| label == required),
        }
    }
}

/// Parse an "HH:mm" string into a minute of day.
pub(crate) fn parse_hhmm(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Format a minute of day back into "HH:mm".
pub(crate) fn format_hhmm(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
