// Deterministic, portable pseudo-random number generator for score generation.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// Hand-rolled with no RNG crate so that a given seed yields the same document
// on every platform and toolchain.
//
// This crate is the only randomness source of `ieee1599_gen`. Every component
// of the generator (spine builder, content planner, duration solver, pitch
// resolver, tuplet annotator) draws from one `ScoreRng` owned by the document
// assembler. The order of draws is part of the output contract: changing the
// order changes the document produced for a seed.
//
// **Critical constraint: determinism.** Every method must produce identical
// output given the same prior state, regardless of platform, compiler version,
// or optimization level. Integer methods never touch floating point; the only
// float methods derive their value from the top bits of one `next_u64`.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG, the generator's sole source of randomness.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreRng {
    s: [u64; 4],
}

impl ScoreRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    /// Two `ScoreRng` instances created with the same seed will produce
    /// identical output sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// Uses the upper 53 bits of a `u64` to fill the mantissa of an f64.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generate a uniform random value in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        assert!(low < high, "range_f64: low must be less than high");
        let v = low + self.next_f64() * (high - low);
        // Rounding can land exactly on `high` for very narrow ranges.
        if v >= high { low } else { v }
    }

    /// Generate a uniform random integer in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Generate a uniform random `usize` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Generate a uniform random `usize` in `[low, high]` (inclusive on both ends).
    ///
    /// Panics if `low > high`.
    pub fn range_usize_inclusive(&mut self, low: usize, high: usize) -> usize {
        assert!(low <= high, "range_usize_inclusive: low must be <= high");
        self.range_u64(low as u64, high as u64 + 1) as usize
    }

    /// Generate a uniform random `u32` in `[low, high]` (inclusive on both ends).
    ///
    /// Panics if `low > high`.
    pub fn range_u32_inclusive(&mut self, low: u32, high: u32) -> u32 {
        assert!(low <= high, "range_u32_inclusive: low must be <= high");
        self.range_u64(low as u64, high as u64 + 1) as u32
    }

    /// Generate a uniform random `i32` in `[low, high]` (inclusive on both ends).
    ///
    /// The range is shifted into unsigned space before sampling, so negative
    /// bounds (e.g. octave -1) draw exactly like their positive counterparts.
    /// Panics if `low > high`.
    pub fn range_i32_inclusive(&mut self, low: i32, high: i32) -> i32 {
        assert!(low <= high, "range_i32_inclusive: low must be <= high");
        let span = (high as i64 - low as i64) as u64 + 1;
        (low as i64 + self.range_u64(0, span) as i64) as i32
    }

    /// Return `true` with probability `p`, `false` otherwise.
    ///
    /// `p <= 0.0` always returns false, `p >= 1.0` always returns true.
    pub fn random_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fair coin flip. Consumes exactly one `u64`.
    pub fn coin_flip(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Pick one element of an ordered collection uniformly.
    ///
    /// Returns `None` (without drawing) for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range_usize(0, items.len());
        Some(&items[idx])
    }

    /// Draw `count` distinct integers from `[low, high]`, in draw order.
    ///
    /// Partial Fisher-Yates over the candidate range: exactly `count` draws,
    /// no rejection loop. With `count` equal to the range size the result is
    /// a random permutation of the whole range.
    ///
    /// Panics if `low > high` or `count` exceeds the range size.
    pub fn sample_distinct(&mut self, count: usize, low: u32, high: u32) -> Vec<u32> {
        assert!(low <= high, "sample_distinct: low must be <= high");
        let size = (high - low) as usize + 1;
        assert!(
            count <= size,
            "sample_distinct: cannot draw {count} distinct values from a range of {size}"
        );
        let mut pool: Vec<u32> = (low..=high).collect();
        for i in 0..count {
            let j = self.range_usize(i, size);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }

    /// Shuffle a slice in place (Fisher-Yates, back to front).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.range_usize_inclusive(0, i);
            items.swap(i, j);
        }
    }
}

/// SplitMix64, used only for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinism_same_seed_same_output() {
        let mut a = ScoreRng::new(1234);
        let mut b = ScoreRng::new(1234);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_different_output() {
        let mut a = ScoreRng::new(42);
        let mut b = ScoreRng::new(43);
        // Extremely unlikely to collide on the first value.
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn f64_in_unit_range() {
        let mut rng = ScoreRng::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "f64 out of range: {v}");
        }
    }

    #[test]
    fn range_f64_within_bounds() {
        let mut rng = ScoreRng::new(777);
        for _ in 0..10_000 {
            let v = rng.range_f64(9.0, 11.25);
            assert!((9.0..11.25).contains(&v), "range_f64 out of range: {v}");
        }
    }

    #[test]
    fn range_u64_within_bounds() {
        let mut rng = ScoreRng::new(999);
        for _ in 0..10_000 {
            let v = rng.range_u64(10, 20);
            assert!((10..20).contains(&v), "range_u64 out of range: {v}");
        }
    }

    #[test]
    fn range_u32_inclusive_reaches_both_ends() {
        let mut rng = ScoreRng::new(666);
        let mut saw_low = false;
        let mut saw_high = false;
        for _ in 0..10_000 {
            let v = rng.range_u32_inclusive(1, 4);
            assert!((1..=4).contains(&v), "range_u32_inclusive out of range: {v}");
            saw_low |= v == 1;
            saw_high |= v == 4;
        }
        assert!(saw_low && saw_high);
    }

    #[test]
    fn range_u32_inclusive_degenerate_range() {
        let mut rng = ScoreRng::new(5);
        for _ in 0..100 {
            assert_eq!(rng.range_u32_inclusive(3, 3), 3);
        }
    }

    #[test]
    fn range_i32_inclusive_handles_negative_bounds() {
        let mut rng = ScoreRng::new(31);
        let mut saw_negative = false;
        for _ in 0..10_000 {
            let v = rng.range_i32_inclusive(-1, 2);
            assert!((-1..=2).contains(&v), "range_i32_inclusive out of range: {v}");
            saw_negative |= v == -1;
        }
        assert!(saw_negative);
    }

    #[test]
    fn range_usize_inclusive_within_bounds() {
        let mut rng = ScoreRng::new(666);
        for _ in 0..10_000 {
            let v = rng.range_usize_inclusive(5, 10);
            assert!(
                (5..=10).contains(&v),
                "range_usize_inclusive out of range: {v}"
            );
        }
    }

    #[test]
    fn random_bool_extremes() {
        let mut rng = ScoreRng::new(42);
        for _ in 0..100 {
            assert!(!rng.random_bool(0.0));
        }
        for _ in 0..100 {
            assert!(rng.random_bool(1.0));
        }
    }

    #[test]
    fn coin_flip_is_roughly_fair() {
        let mut rng = ScoreRng::new(42);
        let n = 10_000;
        let heads = (0..n).filter(|_| rng.coin_flip()).count();
        let pct = heads as f64 / n as f64;
        assert!(
            (0.45..0.55).contains(&pct),
            "coin_flip should be ~50%, got {:.1}%",
            pct * 100.0
        );
    }

    #[test]
    fn choose_empty_returns_none_without_drawing() {
        let mut a = ScoreRng::new(8);
        let mut b = ScoreRng::new(8);
        let empty: [u8; 0] = [];
        assert!(a.choose(&empty).is_none());
        // No state advanced.
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn choose_returns_member() {
        let mut rng = ScoreRng::new(17);
        let items = ['G', 'F', 'C'];
        for _ in 0..100 {
            let c = rng.choose(&items).copied();
            assert!(matches!(c, Some('G' | 'F' | 'C')));
        }
    }

    #[test]
    fn sample_distinct_full_range_is_permutation() {
        let mut rng = ScoreRng::new(2024);
        for _ in 0..200 {
            let mut perm = rng.sample_distinct(6, 0, 5);
            assert_eq!(perm.len(), 6);
            perm.sort_unstable();
            assert_eq!(perm, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn sample_distinct_partial_has_no_repeats() {
        let mut rng = ScoreRng::new(7);
        for _ in 0..200 {
            let picks = rng.sample_distinct(4, 10, 20);
            assert_eq!(picks.len(), 4);
            for (i, a) in picks.iter().enumerate() {
                assert!((10..=20).contains(a));
                assert!(!picks[i + 1..].contains(a), "repeat in {picks:?}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn sample_distinct_rejects_oversized_request() {
        let mut rng = ScoreRng::new(1);
        rng.sample_distinct(5, 0, 3);
    }

    #[test]
    fn shuffle_preserves_multiset() {
        let mut rng = ScoreRng::new(99);
        let mut tags = vec!['N', 'N', 'R', 'N', 'R', 'R', 'R'];
        rng.shuffle(&mut tags);
        assert_eq!(tags.iter().filter(|&&c| c == 'N').count(), 3);
        assert_eq!(tags.iter().filter(|&&c| c == 'R').count(), 4);
    }

    #[test]
    fn shuffle_is_deterministic() {
        let mut a = ScoreRng::new(3);
        let mut b = ScoreRng::new(3);
        let mut xs: Vec<u32> = (0..32).collect();
        let mut ys = xs.clone();
        a.shuffle(&mut xs);
        b.shuffle(&mut ys);
        assert_eq!(xs, ys);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = ScoreRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: ScoreRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
