// Exact covering of a measure budget with a fixed number of durations.
//
// Given the meter's budget (e.g. 3/4), an instrument's duration vocabulary
// (unit fractions, each twice the previous, smallest first) and the slot count
// S, find S vocabulary values summing exactly to the budget.
//
// Fast paths, in order: the budget cannot be covered by S values at all
// (`None`); S equals the number of minimal units in the budget (S copies of
// the minimum); the budget is S copies of the maximum. Otherwise a greedy
// walk from the smallest duration upward takes the cursor's duration while
// the rest stays coverable and advances the cursor when it would not. The
// greedy result is shuffled; the fast-path results are uniform and are not.
//
// Coverability of (remaining r, remaining count e) with values >= d:
// every such value is `d * 2^j` up to the maximum `d * t`, so r must be
// `u * d` for an integer u, and e must lie between the fewest pieces that
// make u (`u / t` pieces of size t plus one per set bit of `u % t`) and the
// most (u pieces of size d). Every count in between is reachable by halving.
//
// All arithmetic is on `Ratio<u32>`, so "sums to the budget" is exact
// equality with no tolerance.

use ieee1599_prng::ScoreRng;
use num_rational::Ratio;

pub type Duration = Ratio<u32>;

/// Whether `remaining` can be written as exactly `events` values from
/// `{unit, 2 unit, 4 unit, ..., max}`.
pub fn coverable(remaining: Duration, events: usize, unit: Duration, max: Duration) -> bool {
    let units = remaining / unit;
    if !units.is_integer() {
        return false;
    }
    let units = units.to_integer() as usize;
    let top = (max / unit).to_integer().max(1) as usize;
    let fewest = units / top + (units % top).count_ones() as usize;
    fewest <= events && events <= units
}

/// Pick `slots` durations from `candidates` (ascending) summing to `budget`.
///
/// `None` if no such multiset exists; the caller decides whether that is an
/// error or a degraded measure.
pub fn solve_durations(
    rng: &mut ScoreRng,
    budget: Duration,
    candidates: &[Duration],
    slots: usize,
) -> Option<Vec<Duration>> {
    let (&min, &max) = (candidates.first()?, candidates.last()?);
    if slots == 0 {
        return Some(Vec::new());
    }
    if !coverable(budget, slots, min, max) {
        return None;
    }
    if (budget / min).to_integer() as usize == slots {
        return Some(vec![min; slots]);
    }
    if max * Ratio::from_integer(slots as u32) == budget {
        return Some(vec![max; slots]);
    }

    let mut remaining = budget;
    let mut events = slots;
    let mut cursor = 0;
    let mut picked = Vec::with_capacity(slots);
    while remaining != Ratio::from_integer(0) {
        let &d = candidates.get(cursor)?;
        if events > 0 && d <= remaining && coverable(remaining - d, events - 1, d, max) {
            remaining = remaining - d;
            events -= 1;
            picked.push(d);
        } else {
            cursor += 1;
        }
    }
    if events != 0 {
        return None;
    }
    rng.shuffle(&mut picked);
    Some(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: u32, d: u32) -> Duration {
        Ratio::new(n, d)
    }

    fn vocab(max_den: u32, min_den: u32) -> Vec<Duration> {
        let mut v = Vec::new();
        let mut d = min_den;
        while d >= max_den {
            v.push(r(1, d));
            d /= 2;
        }
        v
    }

    fn sum(ds: &[Duration]) -> Duration {
        ds.iter().fold(Ratio::from_integer(0), |acc, &d| acc + d)
    }

    /// Exhaustive check for small inputs.
    fn brute_force(budget: Duration, candidates: &[Duration], slots: usize) -> bool {
        if slots == 0 {
            return budget == Ratio::from_integer(0);
        }
        candidates
            .iter()
            .any(|&d| d <= budget && brute_force(budget - d, candidates, slots - 1))
    }

    #[test]
    fn test_four_four_with_four_slots() {
        let mut rng = ScoreRng::new(1);
        let candidates = vocab(1, 8);
        assert_eq!(candidates, vec![r(1, 8), r(1, 4), r(1, 2), r(1, 1)]);
        let ds = solve_durations(&mut rng, r(4, 4), &candidates, 4).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(sum(&ds), r(1, 1));
        assert!(ds.iter().all(|d| candidates.contains(d)));
    }

    #[test]
    fn test_fast_paths() {
        let mut rng = ScoreRng::new(1);
        let candidates = vocab(1, 8);
        assert_eq!(
            solve_durations(&mut rng, r(1, 1), &candidates, 8).unwrap(),
            vec![r(1, 8); 8]
        );
        assert_eq!(
            solve_durations(&mut rng, r(1, 1), &candidates, 1).unwrap(),
            vec![r(1, 1)]
        );
        assert_eq!(
            solve_durations(&mut rng, r(3, 4), &vocab(4, 16), 3).unwrap(),
            vec![r(1, 4); 3]
        );
    }

    #[test]
    fn test_fast_paths_do_not_draw() {
        let mut a = ScoreRng::new(77);
        let mut b = a.clone();
        solve_durations(&mut a, r(1, 1), &vocab(1, 8), 8).unwrap();
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_too_many_slots_is_infeasible() {
        let mut rng = ScoreRng::new(1);
        assert!(solve_durations(&mut rng, r(1, 1), &vocab(1, 8), 9).is_none());
    }

    #[test]
    fn test_budget_not_multiple_of_minimum_is_infeasible() {
        // 3/8 cannot be built from quarters and halves.
        let mut rng = ScoreRng::new(1);
        assert!(solve_durations(&mut rng, r(3, 8), &vocab(2, 4), 1).is_none());
    }

    #[test]
    fn test_too_few_slots_is_infeasible() {
        // 3:2 needs at least two values when the largest is a whole note.
        let mut rng = ScoreRng::new(1);
        assert!(solve_durations(&mut rng, r(3, 2), &vocab(1, 4), 1).is_none());
        assert!(solve_durations(&mut rng, r(3, 2), &vocab(1, 4), 2).is_some());
    }

    #[test]
    fn test_zero_slots() {
        let mut rng = ScoreRng::new(1);
        assert_eq!(solve_durations(&mut rng, r(1, 1), &vocab(1, 8), 0), Some(vec![]));
    }

    #[test]
    fn test_matches_exhaustive_search() {
        let mut rng = ScoreRng::new(42);
        let budgets = [r(1, 1), r(3, 4), r(6, 8), r(5, 4), r(7, 8), r(2, 4), r(9, 8)];
        for (max_den, min_den) in [(1, 8), (2, 8), (1, 16), (4, 16), (8, 8)] {
            let candidates = vocab(max_den, min_den);
            for &budget in &budgets {
                for slots in 1..=12 {
                    let expected = brute_force(budget, &candidates, slots);
                    let got = solve_durations(&mut rng, budget, &candidates, slots);
                    assert_eq!(
                        got.is_some(),
                        expected,
                        "budget {budget}, 1/{max_den}..1/{min_den}, {slots} slots"
                    );
                    if let Some(ds) = got {
                        assert_eq!(ds.len(), slots);
                        assert_eq!(sum(&ds), budget);
                        assert!(ds.iter().all(|d| candidates.contains(d)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_coverable() {
        let (unit, max) = (r(1, 8), r(1, 1));
        assert!(coverable(r(7, 8), 3, unit, max));
        assert!(!coverable(r(7, 8), 2, unit, max));
        assert!(coverable(r(0, 1), 0, unit, max));
        assert!(!coverable(r(0, 1), 1, unit, max));
        assert!(!coverable(r(1, 8), 0, unit, max));
        assert!(!coverable(r(1, 16), 1, unit, max));
    }
}
