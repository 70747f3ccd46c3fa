//! Location vocabulary and gap labeling from neighboring calendar events.
//!
//! A gap inherits a location from the event that ends right before it and
//! the event that starts right after it: both known and equal, or exactly
//! one known, labels the gap; disagreement or absence leaves it unlabeled,
//! which means compatible with anything.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::gap::{parse_hhmm, EnrichedGap, Gap};

/// Inferred location of a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Home,
    Workplace,
    Transit,
}

/// Where a memo wants its sessions to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPreference {
    NoPreference,
    Home,
    Workplace,
    Transit,
}

impl LocationPreference {
    /// The gap label this preference requires, if any.
    pub fn required_label(self) -> Option<Location> {
        match self {
            Self::NoPreference => None,
            Self::Home => Some(Location::Home),
            Self::Workplace => Some(Location::Workplace),
            Self::Transit => Some(Location::Transit),
        }
    }
}

impl Default for LocationPreference {
    fn default() -> Self {
        Self::NoPreference
    }
}

/// Calendar event for gap-neighbor inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CalendarEvent {
    /// Create a new event without location metadata.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            location: None,
        }
    }

    /// Attach free-form location metadata.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Map a free-form event location string onto the label vocabulary.
pub fn infer_location(raw: &str) -> Option<Location> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    if ["home", "house", "apartment"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        return Some(Location::Home);
    }
    if ["office", "work", "campus", "hq"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        return Some(Location::Workplace);
    }
    if ["transit", "commute", "train", "bus", "subway"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        return Some(Location::Transit);
    }
    None
}

/// Labels gaps from their neighboring calendar events.
pub struct GapEnricher {
    /// Gaps shorter than this are discarded (minutes).
    min_gap_minutes: i64,
}

impl GapEnricher {
    /// Create an enricher with the default minimum gap duration.
    pub fn new() -> Self {
        Self { min_gap_minutes: 5 }
    }

    /// Set the minimum gap duration.
    pub fn with_min_gap(mut self, minutes: i64) -> Self {
        self.min_gap_minutes = minutes;
        self
    }

    /// Validate and label the day's gaps.
    ///
    /// Malformed gaps (unparsable bounds, non-positive or sub-minimum
    /// duration) are skipped silently. Events outside `day` are ignored.
    /// Output is sorted by start minute, then id.
    pub fn enrich(&self, gaps: &[Gap], events: &[CalendarEvent], day: NaiveDate) -> Vec<EnrichedGap> {
        let mut enriched: Vec<EnrichedGap> = gaps
            .iter()
            .filter_map(|gap| {
                let start_minute = parse_hhmm(&gap.start)?;
                let end_minute = parse_hhmm(&gap.end)?;
                if end_minute <= start_minute {
                    return None;
                }
                if i64::from(end_minute - start_minute) < self.min_gap_minutes.max(1) {
                    return None;
                }
                let label = gap
                    .location_label
                    .or_else(|| self.infer_label(start_minute, end_minute, events, day));
                Some(EnrichedGap {
                    id: gap.id.clone(),
                    start_minute,
                    end_minute,
                    label,
                })
            })
            .collect();

        enriched.sort_by(|a, b| {
            a.start_minute
                .cmp(&b.start_minute)
                .then_with(|| a.id.cmp(&b.id))
        });
        enriched
    }

    /// Derive a label from the nearest event ending at or before the gap
    /// start and the nearest event starting at or after the gap end.
    fn infer_label(
        &self,
        start_minute: u32,
        end_minute: u32,
        events: &[CalendarEvent],
        day: NaiveDate,
    ) -> Option<Location> {
        let before = events
            .iter()
            .filter(|e| e.end.date_naive() == day)
            .map(|e| (minute_of_day(e.end), e))
            .filter(|(end, _)| *end <= start_minute)
            .max_by(|(a, ea), (b, eb)| a.cmp(b).then_with(|| eb.id.cmp(&ea.id)));

        let after = events
            .iter()
            .filter(|e| e.start.date_naive() == day)
            .map(|e| (minute_of_day(e.start), e))
            .filter(|(start, _)| *start >= end_minute)
            .min_by(|(a, ea), (b, eb)| a.cmp(b).then_with(|| ea.id.cmp(&eb.id)));

        let before_label = before.and_then(|(_, e)| e.location.as_deref().and_then(infer_location));
        let after_label = after.and_then(|(_, e)| e.location.as_deref().and_then(infer_location));

        match (before_label, after_label) {
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(_), Some(_)) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

impl Default for GapEnricher {
    fn default() -> Self {
        Self::new()
    }
}

fn minute_of_day(instant: DateTime<Utc>) -> u32 {
    instant.hour() * 60 + instant.minute()
}
