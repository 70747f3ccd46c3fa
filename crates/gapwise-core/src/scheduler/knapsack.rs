//! 0/1 knapsack selection of optional suggestions.
//!
//! Weight = session duration in minutes (discretized), value = need x
//! importance, capacity = total gap minutes minus the mandatory
//! reservation. Each suggestion is taken whole or not at all.
//!
//! Determinism: items are iterated in ascending id order and a DP cell is
//! only replaced on a strict value improvement, so equal-value subsets
//! always resolve to the earliest ids.

use crate::scoring::Suggestion;

const VALUE_EPSILON: f64 = 1e-9;

/// Select the value-maximizing subset of `optional` that fits within
/// `capacity_minutes`. Returns the chosen suggestions sorted by
/// descending score, ties by id.
pub(crate) fn select_optional(
    optional: &[Suggestion],
    capacity_minutes: i64,
    resolution_minutes: i64,
) -> Vec<Suggestion> {
    if optional.is_empty() || capacity_minutes <= 0 {
        return Vec::new();
    }

    let mut items: Vec<&Suggestion> = optional.iter().collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));

    let resolution = resolution_minutes.max(1);
    let capacity = (capacity_minutes / resolution) as usize;
    if capacity == 0 {
        return Vec::new();
    }

    let weights: Vec<usize> = items
        .iter()
        .map(|s| {
            let units = (s.duration_minutes as f64 / resolution as f64).round() as i64;
            units.max(1) as usize
        })
        .collect();

    let mut dp = vec![0.0f64; capacity + 1];
    let mut take = vec![vec![false; capacity + 1]; items.len()];

    for (i, item) in items.iter().enumerate() {
        let weight = weights[i];
        if weight > capacity {
            continue;
        }
        let value = item.score();
        // Reverse iteration keeps each item 0/1.
        for w in (weight..=capacity).rev() {
            let candidate = dp[w - weight] + value;
            if candidate > dp[w] + VALUE_EPSILON {
                dp[w] = candidate;
                take[i][w] = true;
            }
        }
    }

    let mut w = capacity;
    let mut chosen: Vec<Suggestion> = Vec::new();
    for i in (0..items.len()).rev() {
        if take[i][w] {
            chosen.push(items[i].clone());
            w -= weights[i];
        }
    }

    chosen.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    chosen
}
