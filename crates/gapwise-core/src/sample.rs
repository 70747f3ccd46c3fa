//! Seeded sample data for demos and tests.
//!
//! Generation is driven by a caller-supplied seed through a PCG stream,
//! so the same seed always produces the same memos -- handy for demos of
//! an engine whose whole contract is determinism.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::memo::{Importance, Memo, MemoKind, RecurrencePeriod};
use crate::timeline::{Gap, Location, LocationPreference};

const ACTIVITY_NAMES: &[&str] = &[
    "exercise",
    "meal_prep",
    "call_mom",
    "deep_work",
    "groceries",
    "meditation",
    "language_practice",
    "cleaning",
    "read_book",
    "cooking",
    "shopping",
    "workout",
    "study",
    "errands",
    "planning",
];

/// Generate `count` random memos around `now`.
///
/// Roughly 20% deadlines (some due today), 30% routines, the rest
/// backlog; 30% carry a location preference.
pub fn sample_memos(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<Memo> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut memos = Vec::with_capacity(count);

    for i in 0..count {
        let name = ACTIVITY_NAMES[rng.gen_range(0..ACTIVITY_NAMES.len())];
        let id = format!("{name}_{i}");
        let created_at = now - Duration::days(rng.gen_range(1..30));

        let roll: f64 = rng.gen();
        let mut memo = if roll < 0.2 {
            let due_in_days = rng.gen_range(0..10);
            Memo::with_id(&id, name, MemoKind::Deadline, created_at)
                .with_deadline(now + Duration::days(due_in_days))
        } else if roll < 0.5 {
            let period = match rng.gen_range(0..3) {
                0 => RecurrencePeriod::Day,
                1 => RecurrencePeriod::Week,
                _ => RecurrencePeriod::Month,
            };
            Memo::with_id(&id, name, MemoKind::Routine, created_at)
                .with_recurrence(rng.gen_range(1..5), period)
        } else {
            let mut backlog = Memo::with_id(&id, name, MemoKind::Backlog, created_at);
            backlog.last_activity = Some(now - Duration::days(rng.gen_range(0..21)));
            backlog
        };

        memo = memo.with_session_minutes(rng.gen_range(3..25) * 5);
        memo.importance = match rng.gen_range(0..4) {
            0 => Some(Importance::Low),
            1 => Some(Importance::High),
            2 => Some(Importance::Medium),
            _ => None,
        };
        if rng.gen_bool(0.3) {
            memo.location_preference = match rng.gen_range(0..3) {
                0 => LocationPreference::Home,
                1 => LocationPreference::Workplace,
                _ => LocationPreference::Transit,
            };
        }
        memos.push(memo);
    }

    memos
}

/// A plausible day of gaps: morning at home, lunch at the office, a
/// commute sliver, and a free evening.
pub fn sample_gaps() -> Vec<Gap> {
    vec![
        Gap::new("morning", "07:30", "08:45").with_label(Location::Home),
        Gap::new("lunch", "12:00", "13:00").with_label(Location::Workplace),
        Gap::new("commute", "17:30", "18:00").with_label(Location::Transit),
        Gap::new("evening", "19:00", "22:00"),
    ]
}
