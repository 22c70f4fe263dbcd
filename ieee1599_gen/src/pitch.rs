// Pitch resolution: continuous height -> spelled pitch.
//
// A notehead's pitch is drawn in four steps, always in this order:
// 1. a height uniformly in the window between the pitch classes of the
//    instrument's min and max registers (octaves are ignored here);
// 2. an accidental, whose offset is added to the height before wrapping the
//    result into [0, 12);
// 3. an octave in [min octave, max octave], nudged back inside the register
//    when the resolved class lies past the bound's class at the edge octave;
// 4. one spelling out of the alternates of the nearest canonical key.
//
// The nearest key is found circularly, equidistant keys resolving to the
// lower one (see `SpellingTable::nearest_key`).

use crate::config::Register;
use crate::tables::{
    Accidental, PitchKey, QUARTERS_PER_SEMITONE, Spelling, SpellingTable, Step, key_to_semitones,
};
use ieee1599_prng::ScoreRng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedPitch {
    pub spelling: Spelling,
    pub octave: i32,
    /// Canonical key the sampled height resolved to.
    pub key: PitchKey,
}

impl ResolvedPitch {
    pub fn step(&self) -> Step {
        self.spelling.step
    }

    /// `Natural` when the spelling has no accidental suffix.
    pub fn actual_accidental(&self) -> Accidental {
        self.spelling.accidental
    }

    /// The accidental to print, if any.
    pub fn printed_accidental(&self) -> Option<Accidental> {
        match self.spelling.accidental {
            Accidental::Natural => None,
            acc => Some(acc),
        }
    }

    /// Pitch-class height in semitones, in [0, 12).
    pub fn height(&self) -> f64 {
        key_to_semitones(self.key)
    }
}

/// Draws pitches for one instrument.
pub struct PitchResolver<'a> {
    table: &'a SpellingTable,
    min_register: Register,
    max_register: Register,
    /// Height window in semitones, `low < high`.
    low: f64,
    high: f64,
}

impl<'a> PitchResolver<'a> {
    pub fn new(table: &'a SpellingTable, min_register: Register, max_register: Register) -> Self {
        let a = min_register.key();
        let b = max_register.key();
        let low = key_to_semitones(a.min(b));
        let high = if a == b {
            low + 1.0 / QUARTERS_PER_SEMITONE as f64
        } else {
            key_to_semitones(a.max(b))
        };
        PitchResolver {
            table,
            min_register,
            max_register,
            low,
            high,
        }
    }

    /// Draw one pitch. `None` only if the table has no spelling for the
    /// resolved key, which a table built by `SpellingTable::new` never lacks.
    pub fn resolve(&self, rng: &mut ScoreRng) -> Option<ResolvedPitch> {
        let height = rng.range_f64(self.low, self.high);
        let accidental = *rng.choose(&Accidental::ALL)?;
        let mut shifted = (height + accidental.offset_semitones()).rem_euclid(12.0);
        if shifted >= 12.0 {
            shifted -= 12.0;
        }
        let key = self.table.nearest_key(shifted);

        let (min_octave, max_octave) = (self.min_register.octave, self.max_register.octave);
        let mut octave = rng.range_i32_inclusive(min_octave, max_octave);
        if octave == max_octave && key > self.max_register.key() && octave > min_octave {
            octave -= 1;
        } else if octave == min_octave && key < self.min_register.key() && octave < max_octave {
            octave += 1;
        }

        let spelling = *rng.choose(self.table.spellings(key))?;
        Some(ResolvedPitch {
            spelling,
            octave,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(text: &str) -> Register {
        Register::parse(text).unwrap()
    }

    #[test]
    fn test_resolved_pitch_is_in_pitch_class_space() {
        let table = SpellingTable::new();
        let resolver = PitchResolver::new(&table, reg("C3"), reg("B5"));
        let mut rng = ScoreRng::new(17);
        for _ in 0..2000 {
            let p = resolver.resolve(&mut rng).unwrap();
            assert!((0.0..12.0).contains(&p.height()));
            assert!((3..=5).contains(&p.octave));
            assert_eq!(p.spelling.key(), p.key);
        }
    }

    #[test]
    fn test_octave_bumped_below_max_bound() {
        let table = SpellingTable::new();
        let max = reg("E4");
        let resolver = PitchResolver::new(&table, reg("C3"), max);
        let mut rng = ScoreRng::new(4);
        for _ in 0..2000 {
            let p = resolver.resolve(&mut rng).unwrap();
            if p.octave == 4 {
                assert!(p.key <= max.key(), "{} {} above {max}", p.spelling, p.octave);
            }
        }
    }

    #[test]
    fn test_octave_bumped_above_min_bound() {
        let table = SpellingTable::new();
        let min = reg("D3");
        let resolver = PitchResolver::new(&table, min, reg("G4"));
        let mut rng = ScoreRng::new(9);
        for _ in 0..2000 {
            let p = resolver.resolve(&mut rng).unwrap();
            if p.octave == 3 {
                assert!(p.key >= min.key());
            }
        }
    }

    #[test]
    fn test_single_octave_register_is_never_bumped() {
        let table = SpellingTable::new();
        let resolver = PitchResolver::new(&table, reg("C4"), reg("E4"));
        let mut rng = ScoreRng::new(31);
        for _ in 0..500 {
            assert_eq!(resolver.resolve(&mut rng).unwrap().octave, 4);
        }
    }

    #[test]
    fn test_equal_keys_use_narrow_window() {
        // C3..C4: every pre-accidental height lies in [0, 0.25), so the
        // resolved class is within two semitones of C.
        let table = SpellingTable::new();
        let resolver = PitchResolver::new(&table, reg("C3"), reg("C4"));
        let mut rng = ScoreRng::new(12);
        for _ in 0..1000 {
            let h = resolver.resolve(&mut rng).unwrap().height();
            assert!(h <= 2.25 || h >= 9.75, "height {h}");
        }
    }

    #[test]
    fn test_printed_accidental() {
        let natural = ResolvedPitch {
            spelling: Spelling::parse("G").unwrap(),
            octave: 4,
            key: 28,
        };
        assert_eq!(natural.printed_accidental(), None);
        assert_eq!(natural.actual_accidental(), Accidental::Natural);

        let demisharp = ResolvedPitch {
            spelling: Spelling::parse("G_demisharp").unwrap(),
            octave: 4,
            key: 29,
        };
        assert_eq!(demisharp.printed_accidental(), Some(Accidental::Demisharp));
        assert_eq!(demisharp.step(), Step::G);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let table = SpellingTable::new();
        let resolver = PitchResolver::new(&table, reg("A2"), reg("F_sharp5"));
        let draw = |seed| {
            let mut rng = ScoreRng::new(seed);
            (0..50)
                .map(|_| resolver.resolve(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(5), draw(5));
    }
}
