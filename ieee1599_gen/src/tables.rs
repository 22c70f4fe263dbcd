// Static lookup data consumed read-only by the generator.
//
// - Step letters and their natural pitch-class positions.
// - Accidentals and their offsets (including quarter-tone accidentals).
// - The canonical spelling map: pitch-class key -> every spelling that lands
//   on it. Built from the 7 x 9 step/accidental product rather than written
//   out by hand, so each spelling's step + offset agrees with its key.
// - Clef shapes and staff steps.
// - Irregular-group (tuplet) tables for simple and compound meters.
//
// Pitch classes are fixed-point: one unit is a quarter of a semitone, so the
// octave spans keys 0..48 and every key is an exact integer. Float pitch
// heights only exist transiently inside `pitch.rs` while sampling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Quarter-semitone units per semitone.
pub const QUARTERS_PER_SEMITONE: i32 = 4;

/// Quarter-semitone units per octave.
pub const QUARTERS_PER_OCTAVE: i32 = 12 * QUARTERS_PER_SEMITONE;

/// A pitch-class key in quarter-semitone units, always in `0..48`.
pub type PitchKey = u8;

/// Convert a key to its semitone height in `[0, 12)`.
pub fn key_to_semitones(key: PitchKey) -> f64 {
    key as f64 / QUARTERS_PER_SEMITONE as f64
}

/// Wrap an arbitrary quarter-unit value into `0..48`.
pub fn wrap_quarters(quarters: i32) -> PitchKey {
    quarters.rem_euclid(QUARTERS_PER_OCTAVE) as PitchKey
}

// ---------------------------------------------------------------------------
// Steps and accidentals
// ---------------------------------------------------------------------------

/// Anglo-Saxon step letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    pub const ALL: [Step; 7] = [Step::C, Step::D, Step::E, Step::F, Step::G, Step::A, Step::B];

    /// Natural pitch class in semitones.
    pub fn semitones(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Step> {
        match c.to_ascii_uppercase() {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }
}

/// Accidentals known to the IEEE 1599 `printed_accidentals` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
    DoubleSharp,
    DoubleFlat,
    Demisharp,
    Demiflat,
    SharpAndAHalf,
    FlatAndAHalf,
}

impl Accidental {
    /// Table order. Random accidental picks index into this array.
    pub const ALL: [Accidental; 9] = [
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::Flat,
        Accidental::DoubleSharp,
        Accidental::DoubleFlat,
        Accidental::Demisharp,
        Accidental::Demiflat,
        Accidental::SharpAndAHalf,
        Accidental::FlatAndAHalf,
    ];

    /// Offset from the natural step, in quarter-semitone units.
    pub fn offset_quarters(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 4,
            Accidental::Flat => -4,
            Accidental::DoubleSharp => 8,
            Accidental::DoubleFlat => -8,
            Accidental::Demisharp => 1,
            Accidental::Demiflat => -1,
            Accidental::SharpAndAHalf => 3,
            Accidental::FlatAndAHalf => -3,
        }
    }

    /// Offset in semitones (e.g. +0.75 for sharp_and_a_half).
    pub fn offset_semitones(self) -> f64 {
        self.offset_quarters() as f64 / QUARTERS_PER_SEMITONE as f64
    }

    /// Element/attribute name used in the document.
    pub fn name(self) -> &'static str {
        match self {
            Accidental::Natural => "natural",
            Accidental::Sharp => "sharp",
            Accidental::Flat => "flat",
            Accidental::DoubleSharp => "double_sharp",
            Accidental::DoubleFlat => "double_flat",
            Accidental::Demisharp => "demisharp",
            Accidental::Demiflat => "demiflat",
            Accidental::SharpAndAHalf => "sharp_and_a_half",
            Accidental::FlatAndAHalf => "flat_and_a_half",
        }
    }

    pub fn from_name(name: &str) -> Option<Accidental> {
        Accidental::ALL.into_iter().find(|a| a.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Spellings
// ---------------------------------------------------------------------------

/// A written pitch class: step letter plus accidental, e.g. `F_sharp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spelling {
    pub step: Step,
    pub accidental: Accidental,
}

impl Spelling {
    pub fn new(step: Step, accidental: Accidental) -> Self {
        Spelling { step, accidental }
    }

    /// The pitch-class key this spelling sounds at.
    pub fn key(self) -> PitchKey {
        wrap_quarters(self.step.semitones() * QUARTERS_PER_SEMITONE + self.accidental.offset_quarters())
    }

    /// Quarter-unit height before wrapping. `B_sharp` is 48, `C_flat` is -4.
    pub fn unwrapped_quarters(self) -> i32 {
        self.step.semitones() * QUARTERS_PER_SEMITONE + self.accidental.offset_quarters()
    }

    /// Parse `C`, `C_sharp`, `B_flat_and_a_half`, ...
    pub fn parse(s: &str) -> Option<Spelling> {
        let mut chars = s.chars();
        let step = Step::from_letter(chars.next()?)?;
        let rest = chars.as_str();
        if rest.is_empty() {
            return Some(Spelling::new(step, Accidental::Natural));
        }
        let name = rest.strip_prefix('_')?;
        Some(Spelling::new(step, Accidental::from_name(name)?))
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accidental {
            Accidental::Natural => write!(f, "{}", self.step.letter()),
            acc => write!(f, "{}_{}", self.step.letter(), acc.name()),
        }
    }
}

/// Canonical map from pitch-class key to its alternate enharmonic spellings.
///
/// Keys iterate in ascending order. Within a key, spellings are ordered by
/// step letter (C..B) and then by `Accidental::ALL`, which fixes the index a
/// random pick lands on.
#[derive(Debug, Clone)]
pub struct SpellingTable {
    by_key: BTreeMap<PitchKey, Vec<Spelling>>,
}

impl SpellingTable {
    pub fn new() -> Self {
        let mut by_key: BTreeMap<PitchKey, Vec<Spelling>> = BTreeMap::new();
        for step in Step::ALL {
            for accidental in Accidental::ALL {
                let spelling = Spelling::new(step, accidental);
                by_key.entry(spelling.key()).or_default().push(spelling);
            }
        }
        SpellingTable { by_key }
    }

    /// All keys, ascending.
    pub fn keys(&self) -> impl Iterator<Item = PitchKey> + '_ {
        self.by_key.keys().copied()
    }

    pub fn spellings(&self, key: PitchKey) -> &[Spelling] {
        self.by_key.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Key whose spelling list contains `spelling`.
    pub fn key_of(&self, spelling: Spelling) -> Option<PitchKey> {
        self.by_key
            .iter()
            .find(|(_, list)| list.contains(&spelling))
            .map(|(&k, _)| k)
    }

    /// Key closest to `semitones` (already wrapped into `[0, 12)`).
    ///
    /// Distance is circular, so 11.9 is closer to 0 than to 11.75. Equidistant
    /// keys resolve to the lower one: keys are scanned ascending and only a
    /// strictly smaller distance replaces the current best.
    pub fn nearest_key(&self, semitones: f64) -> PitchKey {
        let mut best: PitchKey = 0;
        let mut best_distance = f64::INFINITY;
        for key in self.keys() {
            let direct = (key_to_semitones(key) - semitones).abs();
            let distance = direct.min(12.0 - direct);
            if distance < best_distance {
                best = key;
                best_distance = distance;
            }
        }
        best
    }
}

impl Default for SpellingTable {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Clefs and irregular groups
// ---------------------------------------------------------------------------

/// Clef shapes a staff may be given.
pub const CLEF_SHAPES: [char; 3] = ['G', 'F', 'C'];

/// Staff steps a clef may sit on.
pub const CLEF_STAFF_STEPS: [u32; 3] = [2, 4, 6];

/// Irregular groups for compound meters: group size -> base divisor.
pub const COMPOUND_IRREGULAR_GROUPS: [(u32, u32); 7] =
    [(2, 1), (4, 2), (5, 2), (7, 4), (9, 4), (11, 4), (13, 4)];

/// Irregular groups for simple meters: group size -> base divisor.
pub const SIMPLE_IRREGULAR_GROUPS: [(u32, u32); 7] =
    [(3, 2), (5, 4), (6, 4), (7, 8), (9, 8), (11, 8), (13, 8)];
