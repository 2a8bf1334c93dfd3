//! Candidate selection helpers.
//!
//! Both integerizers repeatedly answer "which of these indices?":
//! - the 1D correction step picks `e` entries to decrement,
//! - the 2D reallocation loop picks one cell per row per pass.
//!
//! Deterministic picks go through [`select_by_rank`] / [`best_by_rank`],
//! parameterised by the enumerated [`Rank`] and [`TieBreak`] rules.
//! Probabilistic picks go through [`weighted_sample_without_replacement`].

use std::cmp::Ordering;

use crate::rng::RandomSource;
use crate::types::{Rank, TieBreak};

/// Whether candidate `a` is preferred over candidate `b`.
#[inline]
fn ranks_before<K: PartialOrd>(keys: &[K], a: usize, b: usize, rank: Rank, tie: TieBreak) -> bool {
    ranking(keys, a, b, rank, tie) == Ordering::Less
}

/// Total order on candidates: `Less` means `a` is selected before `b`.
fn ranking<K: PartialOrd>(keys: &[K], a: usize, b: usize, rank: Rank, tie: TieBreak) -> Ordering {
    let by_key = keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal);
    let by_key = match rank {
        Rank::Largest => by_key.reverse(),
        Rank::Smallest => by_key,
    };
    by_key.then_with(|| match tie {
        TieBreak::FirstOccurrence => a.cmp(&b),
        TieBreak::LastOccurrence => b.cmp(&a),
    })
}

/// Selects `count` candidates in rank order.
///
/// Returns fewer than `count` indices only when there are fewer candidates.
///
/// # Examples
///
/// ```
/// use integerize_core::select::select_by_rank;
/// use integerize_core::types::{Rank, TieBreak};
///
/// let keys = [1_u64, 1, 3, 1];
/// let all = [0, 1, 2, 3];
/// assert_eq!(select_by_rank(&keys, &all, 2, Rank::Largest, TieBreak::LastOccurrence), vec![2, 3]);
/// assert_eq!(select_by_rank(&keys, &all, 2, Rank::Smallest, TieBreak::FirstOccurrence), vec![0, 1]);
/// ```
pub fn select_by_rank<K: PartialOrd>(
    keys: &[K],
    candidates: &[usize],
    count: usize,
    rank: Rank,
    tie: TieBreak,
) -> Vec<usize> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by(|&a, &b| ranking(keys, a, b, rank, tie));
    ordered.truncate(count);
    ordered
}

/// Best single candidate under the rank rule, or `None` if there are none.
pub fn best_by_rank<K: PartialOrd>(
    keys: &[K],
    candidates: impl IntoIterator<Item = usize>,
    rank: Rank,
    tie: TieBreak,
) -> Option<usize> {
    candidates.into_iter().fold(None, |best, c| match best {
        Some(b) if !ranks_before(keys, c, b, rank, tie) => Some(b),
        _ => Some(c),
    })
}

/// Draws `count` distinct candidates with probability proportional to
/// `weights[candidate]`, removing each pick from the pool.
///
/// Every draw consumes exactly one uniform value from `rng`: the target
/// `u * total` is located on the running cumulative weight of the remaining
/// pool, visited in the order given. Zero-weight candidates are never drawn
/// while positive weight remains; if the pool's weight is exhausted the
/// remaining picks take the earliest pool entries without drawing.
///
/// # Examples
///
/// ```
/// use integerize_core::rng::SeededRng;
/// use integerize_core::select::weighted_sample_without_replacement;
///
/// let mut rng = SeededRng::from_seed(42);
/// let picks = weighted_sample_without_replacement(&[0.5, 0.0, 0.5], &[0, 1, 2], 2, &mut rng);
/// assert_eq!(picks.len(), 2);
/// assert!(!picks.contains(&1));
/// ```
pub fn weighted_sample_without_replacement(
    weights: &[f64],
    candidates: &[usize],
    count: usize,
    rng: &mut dyn RandomSource,
) -> Vec<usize> {
    let mut pool = candidates.to_vec();
    let mut selected = Vec::with_capacity(count.min(pool.len()));

    while selected.len() < count && !pool.is_empty() {
        let total: f64 = pool.iter().map(|&i| weights[i]).sum();
        let position = if total > 0.0 {
            let target = rng.next_uniform() * total;
            locate(weights, &pool, target)
        } else {
            0
        };
        selected.push(pool.remove(position));
    }
    selected
}

/// Position in `pool` whose cumulative-weight interval contains `target`.
fn locate(weights: &[f64], pool: &[usize], target: f64) -> usize {
    let mut cumulative = 0.0;
    for (position, &i) in pool.iter().enumerate() {
        cumulative += weights[i];
        if target < cumulative {
            return position;
        }
    }
    // Rounding left target at or past the total: last positive-weight entry.
    pool.iter().rposition(|&i| weights[i] > 0.0).unwrap_or(0)
}
