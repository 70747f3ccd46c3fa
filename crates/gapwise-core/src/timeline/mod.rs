//! Free-time windows and their location enrichment.
//!
//! Gaps are computed by an external collaborator; this module validates
//! them, converts "HH:mm" bounds into minute-of-day arithmetic, and infers
//! a location label for each gap from the calendar events bordering it.

pub mod gap;
pub mod location;

pub use gap::{EnrichedGap, Gap};
pub use location::{CalendarEvent, GapEnricher, Location, LocationPreference};
