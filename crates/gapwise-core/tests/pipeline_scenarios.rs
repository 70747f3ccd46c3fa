//! End-to-end pipeline scenarios and invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gapwise_core::{
    mark_session_complete, CompletionState, Gap, Location, LocationPreference, Memo, MemoKind,
    RecurrencePeriod, ScheduleOptions, SuggestionEngine,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 11, 7, 0, 0).unwrap()
}

fn options() -> ScheduleOptions {
    ScheduleOptions {
        skip_enrichment: true,
        now: Some(now()),
    }
}

fn backlog(id: &str, session_minutes: i64) -> Memo {
    Memo::with_id(id, id, MemoKind::Backlog, now() - Duration::days(3))
        .with_session_minutes(session_minutes)
}

/// Scenario A: one backlog task, one large unlabeled gap -- scheduled.
#[test]
fn test_single_task_single_gap() {
    let engine = SuggestionEngine::new();
    let gaps = vec![Gap::new("g1", "10:00", "11:00")];

    let outcome = engine.generate_schedule(&[backlog("chore", 30)], &gaps, &[], &options());

    assert_eq!(outcome.schedule.scheduled.len(), 1);
    let block = &outcome.schedule.scheduled[0];
    assert_eq!(block.memo_id, "chore");
    assert_eq!(block.gap_id, "g1");
    assert_eq!(block.start_time, "10:00");
    assert_eq!(block.end_time, "10:30");
    assert!(outcome.schedule.dropped.is_empty());
    assert!(outcome.schedule.mandatory_dropped.is_empty());
    assert_eq!(outcome.schedule.total_scheduled_minutes, 30);
    assert_eq!(outcome.schedule.unused_gap_minutes, 30);
}

/// Scenario B: a deadline due today competes with a backlog task for the
/// only gap that fits exactly one of them -- the deadline wins.
#[test]
fn test_mandatory_wins_the_only_gap() {
    let engine = SuggestionEngine::new();
    let due_today = Memo::with_id("taxes", "File taxes", MemoKind::Deadline, now() - Duration::days(10))
        .with_deadline(now() + Duration::hours(10))
        .with_session_minutes(30);
    let competitor = backlog("photos", 30);

    let gaps = vec![Gap::new("g1", "09:00", "09:30")];
    let outcome = engine.generate_schedule(&[due_today, competitor], &gaps, &[], &options());

    assert_eq!(outcome.schedule.scheduled.len(), 1);
    assert_eq!(outcome.schedule.scheduled[0].memo_id, "taxes");
    assert_eq!(outcome.schedule.dropped.len(), 1);
    assert_eq!(outcome.schedule.dropped[0].memo_id, "photos");
    assert!(outcome.schedule.mandatory_dropped.is_empty());
    assert_eq!(outcome.summary.mandatory_count, 1);
}

/// Scenario C: a home-only routine against a workplace-labeled gap --
/// nothing scheduled, the task is dropped.
#[test]
fn test_location_mismatch_drops_task() {
    let engine = SuggestionEngine::new();
    let home_routine = Memo::with_id("yoga", "Yoga", MemoKind::Routine, now() - Duration::days(30))
        .with_recurrence(3, RecurrencePeriod::Week)
        .with_session_minutes(30)
        .with_location_preference(LocationPreference::Home);

    let gaps = vec![Gap::new("g1", "12:00", "13:00").with_label(Location::Workplace)];
    let outcome = engine.generate_schedule(&[home_routine], &gaps, &[], &options());

    assert!(outcome.schedule.scheduled.is_empty());
    assert_eq!(outcome.schedule.dropped.len(), 1);
    assert_eq!(outcome.schedule.dropped[0].memo_id, "yoga");
}

/// Scenario D: no gaps at all -- everything lands in the drop lists.
#[test]
fn test_no_gaps_everything_dropped() {
    let engine = SuggestionEngine::new();
    let mandatory = Memo::with_id("due", "Due", MemoKind::Deadline, now() - Duration::days(5))
        .with_deadline(now())
        .with_session_minutes(30);
    let optional = backlog("later", 30);

    let outcome = engine.generate_schedule(&[mandatory, optional], &[], &[], &options());

    assert!(outcome.schedule.scheduled.is_empty());
    assert_eq!(outcome.schedule.mandatory_dropped.len(), 1);
    assert_eq!(outcome.schedule.mandatory_dropped[0].memo_id, "due");
    assert_eq!(outcome.schedule.dropped.len(), 1);
    assert_eq!(outcome.schedule.dropped[0].memo_id, "later");
}

/// Identical inputs must yield identical results, byte for byte.
#[test]
fn test_determinism_across_calls() {
    let engine = SuggestionEngine::new();
    let memos: Vec<Memo> = (0..10)
        .map(|i| {
            let mut memo = backlog(&format!("task_{i}"), 20 + (i % 4) * 15);
            memo.last_activity = Some(now() - Duration::days(i));
            memo
        })
        .collect();
    let gaps = vec![
        Gap::new("g1", "09:00", "10:30"),
        Gap::new("g2", "13:00", "14:00").with_label(Location::Home),
        Gap::new("g3", "20:00", "21:00"),
    ];

    let first = engine.generate_schedule(&memos, &gaps, &[], &options());
    let second = engine.generate_schedule(&memos, &gaps, &[], &options());

    let a = serde_json::to_string(&first.schedule).unwrap();
    let b = serde_json::to_string(&second.schedule).unwrap();
    assert_eq!(a, b);
}

/// Gap labels inferred from calendar neighbors gate placement end to end.
#[test]
fn test_neighbor_inference_gates_placement() {
    use gapwise_core::CalendarEvent;

    let engine = SuggestionEngine::new();
    let home_task = backlog("stretch", 30).with_location_preference(LocationPreference::Home);

    // Gap sits between two office meetings: labeled workplace, so the
    // home-only task cannot land there.
    let gaps = vec![Gap::new("between", "10:00", "11:00")];
    let events = vec![
        CalendarEvent::new(
            "standup",
            "Standup",
            Utc.with_ymd_and_hms(2026, 3, 11, 9, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 11, 10, 0, 0).unwrap(),
        )
        .at("Office 4F"),
        CalendarEvent::new(
            "review",
            "Design review",
            Utc.with_ymd_and_hms(2026, 3, 11, 11, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 11, 12, 0, 0).unwrap(),
        )
        .at("Office 4F"),
    ];

    let outcome = engine.generate_schedule(&[home_task], &gaps, &events, &options());
    assert!(outcome.schedule.scheduled.is_empty());
    assert_eq!(outcome.schedule.dropped.len(), 1);
}

/// Zero-duration and malformed gaps contribute no capacity.
#[test]
fn test_malformed_gaps_ignored() {
    let engine = SuggestionEngine::new();
    let gaps = vec![
        Gap::new("broken", "whenever", "later"),
        Gap::new("empty", "10:00", "10:00"),
        Gap::new("real", "11:00", "11:45"),
    ];

    let outcome = engine.generate_schedule(&[backlog("chore", 30)], &gaps, &[], &options());
    assert_eq!(outcome.schedule.scheduled.len(), 1);
    assert_eq!(outcome.schedule.scheduled[0].gap_id, "real");
    assert_eq!(outcome.schedule.unused_gap_minutes, 15);
}

/// A routine whose weekly goal was met last week resurfaces this week.
#[test]
fn test_period_rollover_resurfaces_routine() {
    let engine = SuggestionEngine::new();
    let mut routine = Memo::with_id("run", "Run", MemoKind::Routine, now() - Duration::days(60))
        .with_recurrence(3, RecurrencePeriod::Week)
        .with_session_minutes(30);
    // Completed its goal during the previous ISO week.
    routine.status.period_start = Some(Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
    routine.status.completions_this_period = 3;
    routine.status.completion = CompletionState::Completed;

    let gaps = vec![Gap::new("g1", "18:00", "19:00")];
    let outcome = engine.generate_schedule(&[routine], &gaps, &[], &options());

    assert_eq!(outcome.summary.active_tasks, 1);
    assert_eq!(outcome.schedule.scheduled.len(), 1);
}

/// Session updates: zero minutes change nothing.
#[test]
fn test_zero_minute_session_is_noop() {
    let memo = backlog("chore", 30).with_total_minutes(60);
    let before_spent = memo.status.time_spent_minutes;
    let before_state = memo.status.completion;

    let outcome = mark_session_complete(memo, 0, now());
    assert_eq!(outcome.memo.status.time_spent_minutes, before_spent);
    assert_eq!(outcome.memo.status.completion, before_state);
    assert!(!outcome.is_now_complete);
}

mod properties {
    use super::*;
    use gapwise_core::ScheduledBlock;
    use proptest::prelude::*;

    fn parse_minutes(hhmm: &str) -> i64 {
        let (h, m) = hhmm.split_once(':').unwrap();
        h.parse::<i64>().unwrap() * 60 + m.parse::<i64>().unwrap()
    }

    fn blocks_overlap(a: &ScheduledBlock, b: &ScheduledBlock) -> bool {
        parse_minutes(&a.start_time) < parse_minutes(&b.end_time)
            && parse_minutes(&b.start_time) < parse_minutes(&a.end_time)
    }

    fn arb_memos() -> impl Strategy<Value = Vec<Memo>> {
        prop::collection::vec((1i64..8, 10i64..90, 0u8..3), 1..7).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (age_days, session, pref))| {
                    let mut memo = backlog(&format!("m{i}"), session);
                    memo.last_activity = Some(now() - Duration::days(age_days));
                    memo.location_preference = match pref {
                        0 => LocationPreference::NoPreference,
                        1 => LocationPreference::Home,
                        _ => LocationPreference::Workplace,
                    };
                    memo
                })
                .collect()
        })
    }

    fn arb_gaps() -> impl Strategy<Value = Vec<Gap>> {
        prop::collection::vec((8u32..20, 10u32..120, 0u8..3), 1..4).prop_map(|specs| {
            let mut cursor = 6 * 60;
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (offset, len, label))| {
                    let start = cursor + offset * 10;
                    let end = start + len;
                    cursor = end;
                    let gap = Gap::new(
                        format!("g{i}"),
                        format!("{:02}:{:02}", (start / 60).min(23), start % 60),
                        format!("{:02}:{:02}", (end / 60).min(23), end % 60),
                    );
                    match label {
                        0 => gap,
                        1 => gap.with_label(Location::Home),
                        _ => gap.with_label(Location::Workplace),
                    }
                })
                .collect()
        })
    }

    proptest! {
        // Searches at the permutation cap are expensive in debug builds;
        // a smaller case count still covers the space well.
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Blocks assigned to one gap never overlap and stay in bounds.
        #[test]
        fn prop_capacity_respected(memos in arb_memos(), gaps in arb_gaps()) {
            let engine = SuggestionEngine::new();
            let outcome = engine.generate_schedule(&memos, &gaps, &[], &options());
            let schedule = &outcome.schedule;

            for (i, a) in schedule.scheduled.iter().enumerate() {
                for b in schedule.scheduled.iter().skip(i + 1) {
                    if a.gap_id == b.gap_id {
                        prop_assert!(!blocks_overlap(a, b));
                    }
                }
            }

            for block in &schedule.scheduled {
                let gap = gaps.iter().find(|g| g.id == block.gap_id).unwrap();
                let gap_start = parse_minutes(&gap.start);
                let gap_end = parse_minutes(&gap.end);
                prop_assert!(parse_minutes(&block.start_time) >= gap_start);
                prop_assert!(parse_minutes(&block.end_time) <= gap_end);
                prop_assert!(parse_minutes(&block.start_time) < parse_minutes(&block.end_time));
            }
        }

        /// The pipeline is a pure function of its inputs.
        #[test]
        fn prop_deterministic(memos in arb_memos(), gaps in arb_gaps()) {
            let engine = SuggestionEngine::new();
            let first = engine.generate_schedule(&memos, &gaps, &[], &options());
            let second = engine.generate_schedule(&memos, &gaps, &[], &options());
            prop_assert_eq!(first.schedule, second.schedule);
        }

        /// Every suggestion ends up scheduled or dropped, never lost.
        #[test]
        fn prop_no_suggestion_lost(memos in arb_memos(), gaps in arb_gaps()) {
            let engine = SuggestionEngine::new();
            let outcome = engine.generate_schedule(&memos, &gaps, &[], &options());
            let schedule = &outcome.schedule;

            let accounted = schedule.scheduled.len()
                + schedule.dropped.len()
                + schedule.mandatory_dropped.len();
            prop_assert_eq!(accounted, memos.len());
        }
    }
}
