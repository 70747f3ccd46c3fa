//! Recurrence-period rollover for Routine memos.
//!
//! Periods are calendar-aligned: a Day starts at midnight, a Week on Monday
//! 00:00 (ISO), a Month on the 1st. Rollover resets the per-period
//! completion counter and re-arms a completed Routine for the new period.

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, TimeZone, Utc};

use super::{CompletionState, Memo, MemoKind, RecurrencePeriod};

/// Start of the period containing `now`.
pub fn period_start(period: RecurrencePeriod, now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    let start_date = match period {
        RecurrencePeriod::Day => date,
        RecurrencePeriod::Week => {
            date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
        }
        RecurrencePeriod::Month => date.with_day(1).unwrap_or(date),
    };
    Utc.from_utc_datetime(&start_date.and_time(NaiveTime::MIN))
}

/// Length of the period containing `now`, in minutes.
pub fn period_length_minutes(period: RecurrencePeriod, now: DateTime<Utc>) -> i64 {
    match period {
        RecurrencePeriod::Day => 24 * 60,
        RecurrencePeriod::Week => 7 * 24 * 60,
        RecurrencePeriod::Month => {
            let start = period_start(period, now);
            start
                .date_naive()
                .checked_add_months(Months::new(1))
                .map(|next| (next - start.date_naive()).num_minutes())
                .unwrap_or(30 * 24 * 60)
        }
    }
}

/// Fraction of the current period already elapsed, in [0, 1].
pub fn elapsed_fraction(period: RecurrencePeriod, now: DateTime<Utc>) -> f64 {
    let start = period_start(period, now);
    let total = period_length_minutes(period, now).max(1);
    let elapsed = (now - start).num_minutes().clamp(0, total);
    elapsed as f64 / total as f64
}

/// Roll a Routine memo's tracking period forward if `now` has crossed into
/// a new one. Resets the per-period completion counter, advances
/// `period_start`, and re-arms a completed Routine. Idempotent inside a
/// period; a no-op for other memo kinds. Returns whether a rollover
/// happened.
pub fn refresh_period(memo: &mut Memo, now: DateTime<Utc>) -> bool {
    if memo.kind != MemoKind::Routine {
        return false;
    }
    let Some(goal) = memo.recurrence else {
        return false;
    };

    let current = period_start(goal.period, now);
    let rolled = match memo.status.period_start {
        Some(start) => start < current,
        None => true,
    };
    if rolled {
        memo.status.period_start = Some(current);
        memo.status.completions_this_period = 0;
        if memo.status.completion == CompletionState::Completed {
            memo.status.completion = CompletionState::NotStarted;
        }
    }
    rolled
}
