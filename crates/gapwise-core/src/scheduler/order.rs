//! Bounded permutation search for the placement order.
//!
//! The candidate set is small (capped by `permutation_limit`), so every
//! ordering is enumerated, in lexicographic index order, and evaluated by
//! greedy first-fit assignment into the earliest compatible gap. An
//! ordering is strictly better when it places more mandatory suggestions,
//! then more suggestions overall, then more minutes; on exact ties the
//! earlier ordering is kept, which makes the search deterministic.

use crate::scoring::Suggestion;
use crate::timeline::gap::format_hhmm;
use crate::timeline::EnrichedGap;

use super::ScheduledBlock;

/// First-fit assignment outcome for one ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Evaluation {
    mandatory_placed: u32,
    placed: u32,
    placed_minutes: i64,
}

impl Evaluation {
    fn beats(&self, other: &Evaluation) -> bool {
        (self.mandatory_placed, self.placed, self.placed_minutes)
            > (other.mandatory_placed, other.placed, other.placed_minutes)
    }
}

/// Search all orderings of `candidates` and return the best order (as
/// indices into `candidates`) plus the number of permutations evaluated.
///
/// `mandatory` flags parallel `candidates`.
pub(crate) fn find_best_order(
    candidates: &[Suggestion],
    mandatory: &[bool],
    gaps: &[EnrichedGap],
) -> (Vec<usize>, u64) {
    let n = candidates.len();
    if n == 0 {
        return (Vec::new(), 0);
    }

    let mut best_order: Vec<usize> = (0..n).collect();
    let mut best_eval = evaluate(&best_order, candidates, mandatory, gaps);
    let mut permutations: u64 = 1;

    let mut order: Vec<usize> = (0..n).collect();
    while next_permutation(&mut order) {
        permutations += 1;
        let eval = evaluate(&order, candidates, mandatory, gaps);
        if eval.beats(&best_eval) {
            best_eval = eval;
            best_order = order.clone();
        }
    }

    (best_order, permutations)
}

/// Greedily assign an ordering into gaps, producing scheduled blocks and
/// the suggestions that found no slot. Gaps must be sorted by start.
pub(crate) fn assign_order(
    order: &[usize],
    candidates: &[Suggestion],
    gaps: &[EnrichedGap],
) -> (Vec<ScheduledBlock>, Vec<Suggestion>) {
    let mut used = vec![0i64; gaps.len()];
    let mut blocks = Vec::new();
    let mut unplaced = Vec::new();

    for &idx in order {
        let suggestion = &candidates[idx];
        match fit(suggestion, gaps, &used) {
            Some(gap_idx) => {
                let gap = &gaps[gap_idx];
                let start = gap.start_minute + used[gap_idx] as u32;
                let end = start + suggestion.duration_minutes as u32;
                blocks.push(ScheduledBlock {
                    suggestion_id: suggestion.id.clone(),
                    memo_id: suggestion.memo_id.clone(),
                    gap_id: gap.id.clone(),
                    start_time: format_hhmm(start),
                    end_time: format_hhmm(end),
                });
                used[gap_idx] += suggestion.duration_minutes;
            }
            None => unplaced.push(suggestion.clone()),
        }
    }

    (blocks, unplaced)
}

/// Earliest compatible gap with enough remaining capacity.
fn fit(suggestion: &Suggestion, gaps: &[EnrichedGap], used: &[i64]) -> Option<usize> {
    gaps.iter().enumerate().position(|(i, gap)| {
        gap.admits(suggestion.location_preference)
            && gap.duration_minutes() - used[i] >= suggestion.duration_minutes
    })
}

fn evaluate(
    order: &[usize],
    candidates: &[Suggestion],
    mandatory: &[bool],
    gaps: &[EnrichedGap],
) -> Evaluation {
    let mut used = vec![0i64; gaps.len()];
    let mut eval = Evaluation {
        mandatory_placed: 0,
        placed: 0,
        placed_minutes: 0,
    };

    for &idx in order {
        let suggestion = &candidates[idx];
        if let Some(gap_idx) = fit(suggestion, gaps, &used) {
            used[gap_idx] += suggestion.duration_minutes;
            eval.placed += 1;
            eval.placed_minutes += suggestion.duration_minutes;
            if mandatory[idx] {
                eval.mandatory_placed += 1;
            }
        }
    }

    eval
}

/// Advance `order` to its next lexicographic permutation. Returns false
/// once the last permutation has been reached.
fn next_permutation(order: &mut [usize]) -> bool {
    let n = order.len();
    if n < 2 {
        return false;
    }

    let mut i = n - 1;
    while i > 0 && order[i - 1] >= order[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = n - 1;
    while order[j] <= order[i - 1] {
        j -= 1;
    }
    order.swap(i - 1, j);
    order[i..].reverse();
    true
}
