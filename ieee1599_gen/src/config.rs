// Generation parameters and their validation.
//
// `GeneratorConfig` is the caller-facing input: plain values, loadable from
// JSON (every field has a default, so a config file only needs the fields it
// changes) or assembled by the CLI. `InstrumentParams` can also be parsed from
// the compact `key=value,key=value` form used by `--instrument`.
//
// `ScorePlan::from_config` is the Initializer. It validates everything up
// front and derives the constants the generator consumes read-only: the
// parsed `Meter`, the measure count, and one immutable `Instrument` per
// parameter set (duration vocabulary, register bounds, max events per
// measure). Nothing here touches the PRNG, so a rejected config never
// consumes a draw.
//
// See also: `assemble.rs` which drives generation from a `ScorePlan`,
// `tables.rs` for the spelling data registers are parsed against.

use crate::error::ConfigError;
use crate::tables::{Accidental, PitchKey, QUARTERS_PER_OCTAVE, Spelling, Step};
use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Meter
// ---------------------------------------------------------------------------

/// Time signature, e.g. 6:8. Shared by every instrument and measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    pub num: u32,
    pub den: u32,
}

impl Meter {
    /// Parse `N:D` (or `N/D`). Both sides must be positive integers.
    pub fn parse(text: &str) -> Result<Meter, ConfigError> {
        let malformed = || ConfigError::MalformedMeter {
            meter: text.to_string(),
        };
        let (num, den) = text
            .trim()
            .split_once([':', '/'])
            .ok_or_else(malformed)?;
        let num: u32 = num.trim().parse().map_err(|_| malformed())?;
        let den: u32 = den.trim().parse().map_err(|_| malformed())?;
        if num == 0 || den == 0 {
            return Err(malformed());
        }
        Ok(Meter { num, den })
    }

    /// Total duration of one measure, as a fraction of a whole note.
    pub fn budget(&self) -> Ratio<u32> {
        Ratio::new(self.num, self.den)
    }

    /// Compound meters (6:8, 9:8, 12:16, ...) group beats in threes.
    pub fn is_compound(&self) -> bool {
        self.num % 3 == 0 && self.den % 2 == 0
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

// ---------------------------------------------------------------------------
// Register bounds
// ---------------------------------------------------------------------------

/// Spellings used when a register is given as a MIDI note number.
const MIDI_SPELLINGS: [(Step, Accidental); 12] = [
    (Step::C, Accidental::Natural),
    (Step::C, Accidental::Sharp),
    (Step::D, Accidental::Natural),
    (Step::D, Accidental::Sharp),
    (Step::E, Accidental::Natural),
    (Step::F, Accidental::Natural),
    (Step::F, Accidental::Sharp),
    (Step::G, Accidental::Natural),
    (Step::G, Accidental::Sharp),
    (Step::A, Accidental::Natural),
    (Step::A, Accidental::Sharp),
    (Step::B, Accidental::Natural),
];

/// One end of an instrument's pitch range: a spelling plus an octave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register {
    pub spelling: Spelling,
    pub octave: i32,
}

/// Octaves a register may name: the MIDI range, C-1 to G9, rounded out to
/// whole octaves.
pub const REGISTER_OCTAVES: std::ops::RangeInclusive<i32> = -1..=10;

impl Register {
    /// Parse `C4`, `F_sharp3`, `B_flat_and_a_half5`, or a MIDI note number
    /// (`60` is C4).
    pub fn parse(text: &str) -> Option<Register> {
        let text = text.trim();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            let midi: u32 = text.parse().ok()?;
            if midi > 127 {
                return None;
            }
            let (step, accidental) = MIDI_SPELLINGS[(midi % 12) as usize];
            return Some(Register {
                spelling: Spelling::new(step, accidental),
                octave: (midi / 12) as i32 - 1,
            });
        }
        // Spelling names never contain digits or '-', so the octave starts at
        // the first one.
        let split = text
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)?;
        let (name, octave) = text.split_at(split);
        let octave: i32 = octave.parse().ok()?;
        if !REGISTER_OCTAVES.contains(&octave) {
            return None;
        }
        Some(Register {
            spelling: Spelling::parse(name)?,
            octave,
        })
    }

    /// Pitch-class key of the spelling.
    pub fn key(&self) -> PitchKey {
        self.spelling.key()
    }

    /// Height in quarter-semitones above C0, used to order bounds.
    pub fn absolute_quarters(&self) -> i32 {
        self.octave * QUARTERS_PER_OCTAVE + self.spelling.unwrapped_quarters()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.spelling, self.octave)
    }
}

// ---------------------------------------------------------------------------
// User-facing parameters
// ---------------------------------------------------------------------------

/// Per-instrument parameters as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentParams {
    /// Upper bound on notes drawn for the whole piece.
    #[serde(alias = "max_notes_number")]
    pub max_played_notes: u32,
    /// Shortest duration, e.g. `"1/32"`.
    pub min_duration: String,
    /// Longest duration, e.g. `"1/1"`.
    pub max_duration: String,
    /// Lowest register, e.g. `"C3"` or `"48"`.
    pub min_height: String,
    /// Highest register.
    pub max_height: String,
    #[serde(alias = "max_notes_number_chord")]
    pub max_chord_notes: u32,
    /// Whether chord durations may carry tuplet annotations.
    pub irregular_groups: bool,
    /// Minimum delay in VTU between consecutive events.
    pub min_delay: u64,
}

impl Default for InstrumentParams {
    fn default() -> Self {
        InstrumentParams {
            max_played_notes: 10,
            min_duration: "1/32".to_string(),
            max_duration: "1/1".to_string(),
            min_height: "C3".to_string(),
            max_height: "B4".to_string(),
            max_chord_notes: 3,
            irregular_groups: false,
            min_delay: 100,
        }
    }
}

impl FromStr for InstrumentParams {
    type Err = ConfigError;

    /// Parse `key=value` pairs separated by commas. Unlisted keys keep their
    /// defaults.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| ConfigError::MalformedInstrumentSpec {
            spec: spec.to_string(),
            reason,
        };
        let mut params = InstrumentParams::default();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| malformed(format!("'{pair}' is not key=value")))?;
            let (key, value) = (key.trim(), value.trim());
            let number = |v: &str| {
                v.parse::<u64>()
                    .map_err(|_| malformed(format!("{key} expects an integer, got '{v}'")))
            };
            match key {
                "max_played_notes" | "max_notes_number" => {
                    params.max_played_notes = u32::try_from(number(value)?)
                        .map_err(|_| malformed(format!("{key} is out of range")))?;
                }
                "min_duration" => params.min_duration = value.to_string(),
                "max_duration" => params.max_duration = value.to_string(),
                "min_height" => params.min_height = value.to_string(),
                "max_height" => params.max_height = value.to_string(),
                "max_chord_notes" | "max_notes_number_chord" => {
                    params.max_chord_notes = u32::try_from(number(value)?)
                        .map_err(|_| malformed(format!("{key} is out of range")))?;
                }
                "irregular_groups" => {
                    params.irregular_groups = value
                        .parse()
                        .map_err(|_| malformed(format!("{key} expects true or false")))?;
                }
                "min_delay" => params.min_delay = number(value)?,
                other => return Err(malformed(format!("unknown key '{other}'"))),
            }
        }
        Ok(params)
    }
}

/// Everything a generation run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub creator: String,
    pub title: String,
    pub author: String,
    pub seed: u64,
    /// Piece length in seconds.
    pub track_length: u64,
    pub bpm: u32,
    /// `N:D`, e.g. `"4:4"`.
    #[serde(alias = "metre")]
    pub meter: String,
    pub instruments_number: usize,
    pub instruments: Vec<InstrumentParams>,
    /// Fail on a measure whose budget cannot be covered exactly, instead of
    /// writing placeholder durations.
    pub strict_durations: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            creator: "ieee1599_gen".to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            seed: 1234,
            track_length: 120,
            bpm: 108,
            meter: "4:4".to_string(),
            instruments_number: 1,
            instruments: vec![InstrumentParams::default()],
            strict_durations: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// Initializer
// ---------------------------------------------------------------------------

/// Validated, immutable per-instrument constants.
#[derive(Clone, Debug, PartialEq)]
pub struct Instrument {
    /// 1-based, as written into IDs.
    pub number: usize,
    pub max_played_notes: u32,
    /// `1/d` for `d` doubling from the max duration's denominator to the
    /// min duration's. Ascending by duration, i.e. descending denominators.
    pub durations: Vec<Ratio<u32>>,
    pub min_duration_den: u32,
    pub max_duration_den: u32,
    pub min_register: Register,
    pub max_register: Register,
    pub max_chord_notes: u32,
    pub irregular_groups: bool,
    pub min_delay: u64,
    pub max_events_per_measure: u32,
}

impl Instrument {
    fn from_params(
        number: usize,
        params: &InstrumentParams,
        meter: Meter,
    ) -> Result<Instrument, ConfigError> {
        let min_duration_den = parse_unit_fraction(number, "min_duration", &params.min_duration)?;
        let max_duration_den = parse_unit_fraction(number, "max_duration", &params.max_duration)?;
        let durations = duration_vocabulary(max_duration_den, min_duration_den).ok_or(
            ConfigError::InvalidDurationBounds {
                instrument: number,
                min_den: min_duration_den,
                max_den: max_duration_den,
            },
        )?;

        let max_events_per_measure = u32::try_from(
            u64::from(meter.num) * u64::from(min_duration_den) / u64::from(meter.den),
        )
        .map_err(|_| ConfigError::OutOfRange {
            field: format!("instrument {number}: events per measure"),
            reason: format!("1/{min_duration_den} durations in a {meter} measure"),
        })?;
        if max_events_per_measure == 0 {
            return Err(ConfigError::NoRoomForEvents {
                instrument: number,
                min_den: min_duration_den,
                meter: meter.to_string(),
            });
        }

        if params.max_played_notes == 0 {
            return Err(ConfigError::ZeroParameter {
                field: format!("instrument {number}: max_played_notes"),
            });
        }
        if params.max_chord_notes == 0 {
            return Err(ConfigError::ZeroParameter {
                field: format!("instrument {number}: max_chord_notes"),
            });
        }

        let register = |text: &str| {
            Register::parse(text).ok_or_else(|| ConfigError::InvalidRegister {
                instrument: number,
                value: text.to_string(),
            })
        };
        let min_register = register(&params.min_height)?;
        let max_register = register(&params.max_height)?;
        if min_register.absolute_quarters() > max_register.absolute_quarters() {
            return Err(ConfigError::InvertedRegister {
                instrument: number,
                min: params.min_height.clone(),
                max: params.max_height.clone(),
            });
        }

        Ok(Instrument {
            number,
            max_played_notes: params.max_played_notes,
            durations,
            min_duration_den,
            max_duration_den,
            min_register,
            max_register,
            max_chord_notes: params.max_chord_notes,
            irregular_groups: params.irregular_groups,
            min_delay: params.min_delay,
            max_events_per_measure,
        })
    }

    pub fn min_duration(&self) -> Ratio<u32> {
        Ratio::new(1, self.min_duration_den)
    }

    pub fn max_duration(&self) -> Ratio<u32> {
        Ratio::new(1, self.max_duration_den)
    }
}

/// Parse `1/d`, returning `d`.
fn parse_unit_fraction(
    instrument: usize,
    field: &'static str,
    text: &str,
) -> Result<u32, ConfigError> {
    let malformed = || ConfigError::MalformedFraction {
        instrument,
        field,
        value: text.to_string(),
    };
    let (num, den) = text.trim().split_once('/').ok_or_else(malformed)?;
    let num: i64 = num.trim().parse().map_err(|_| malformed())?;
    let den: i64 = den.trim().parse().map_err(|_| malformed())?;
    if den <= 0 {
        return Err(ConfigError::NonPositiveDenominator {
            instrument,
            field,
            value: text.to_string(),
        });
    }
    if num != 1 {
        return Err(ConfigError::UnsupportedDuration {
            instrument,
            field,
            value: text.to_string(),
        });
    }
    u32::try_from(den).map_err(|_| malformed())
}

/// `1/max_den, 1/(2 max_den), ..., 1/min_den`, returned smallest first.
/// `None` if `min_den` is not reached from `max_den` by doubling.
fn duration_vocabulary(max_den: u32, min_den: u32) -> Option<Vec<Ratio<u32>>> {
    let mut dens = Vec::new();
    let mut den = max_den;
    loop {
        dens.push(den);
        if den == min_den {
            break;
        }
        if den > min_den {
            return None;
        }
        den = den.checked_mul(2)?;
    }
    Some(dens.into_iter().rev().map(|d| Ratio::new(1, d)).collect())
}

/// The validated input of one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct ScorePlan {
    pub creator: String,
    pub title: String,
    pub author: String,
    pub seed: u64,
    pub meter: Meter,
    pub measures_count: usize,
    pub instruments: Vec<Instrument>,
    pub strict_durations: bool,
}

impl ScorePlan {
    /// Validate `config` and derive the generation constants.
    pub fn from_config(config: &GeneratorConfig) -> Result<ScorePlan, ConfigError> {
        if config.instruments_number != config.instruments.len() {
            return Err(ConfigError::InstrumentCountMismatch {
                declared: config.instruments_number,
                supplied: config.instruments.len(),
            });
        }
        if config.instruments_number == 0 {
            return Err(ConfigError::ZeroParameter {
                field: "instruments_number".to_string(),
            });
        }
        let meter = Meter::parse(&config.meter)?;
        if config.bpm == 0 {
            return Err(ConfigError::ZeroParameter {
                field: "bpm".to_string(),
            });
        }

        let instruments = config
            .instruments
            .iter()
            .enumerate()
            .map(|(i, params)| Instrument::from_params(i + 1, params, meter))
            .collect::<Result<Vec<_>, _>>()?;

        let beats = config
            .track_length
            .checked_mul(u64::from(config.bpm))
            .ok_or_else(|| ConfigError::OutOfRange {
                field: "track_length".to_string(),
                reason: format!("{} s at {} bpm", config.track_length, config.bpm),
            })?;
        let measures_count = usize::try_from(beats / (60 * u64::from(meter.num))).map_err(|_| {
            ConfigError::OutOfRange {
                field: "track_length".to_string(),
                reason: format!("{beats} beats of {meter}"),
            }
        })?;
        if measures_count == 0 {
            return Err(ConfigError::ZeroParameter {
                field: format!(
                    "measures ({} s at {} bpm is shorter than one {meter} measure)",
                    config.track_length, config.bpm
                ),
            });
        }

        Ok(ScorePlan {
            creator: config.creator.clone(),
            title: config.title.clone(),
            author: config.author.clone(),
            seed: config.seed,
            meter,
            measures_count,
            instruments,
            strict_durations: config.strict_durations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(instruments: Vec<InstrumentParams>) -> GeneratorConfig {
        GeneratorConfig {
            instruments_number: instruments.len(),
            instruments,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_meter_parse() {
        assert_eq!(Meter::parse("4:4").unwrap(), Meter { num: 4, den: 4 });
        assert_eq!(Meter::parse("12/16").unwrap(), Meter { num: 12, den: 16 });
        assert!(matches!(Meter::parse("4"), Err(ConfigError::MalformedMeter { .. })));
        assert!(matches!(Meter::parse("0:4"), Err(ConfigError::MalformedMeter { .. })));
        assert!(matches!(Meter::parse("a:b"), Err(ConfigError::MalformedMeter { .. })));
    }

    #[test]
    fn test_meter_classification() {
        assert!(Meter::parse("6:8").unwrap().is_compound());
        assert!(Meter::parse("9:8").unwrap().is_compound());
        assert!(!Meter::parse("4:4").unwrap().is_compound());
        assert!(!Meter::parse("3:4").unwrap().is_compound());
        assert!(!Meter::parse("3:3").unwrap().is_compound());
    }

    #[test]
    fn test_register_parse() {
        let r = Register::parse("F_sharp3").unwrap();
        assert_eq!(r.spelling.to_string(), "F_sharp");
        assert_eq!(r.octave, 3);
        assert_eq!(r.key(), 24);

        let r = Register::parse("B_flat_and_a_half5").unwrap();
        assert_eq!(r.octave, 5);
        assert_eq!(r.key(), 41);

        let c4 = Register::parse("60").unwrap();
        assert_eq!(c4, Register::parse("C4").unwrap());
        assert_eq!(Register::parse("61").unwrap().to_string(), "C_sharp4");

        assert!(Register::parse("H4").is_none());
        assert!(Register::parse("C").is_none());
        assert!(Register::parse("200").is_none());
    }

    #[test]
    fn test_vocabulary_is_ascending() {
        let v = duration_vocabulary(1, 8).unwrap();
        assert_eq!(
            v,
            vec![Ratio::new(1, 8), Ratio::new(1, 4), Ratio::new(1, 2), Ratio::new(1, 1)]
        );
        assert_eq!(duration_vocabulary(4, 4).unwrap(), vec![Ratio::new(1, 4)]);
        assert!(duration_vocabulary(8, 4).is_none());
        assert!(duration_vocabulary(1, 12).is_none());
    }

    #[test]
    fn test_instrument_spec_string() {
        let p: InstrumentParams =
            "max_played_notes=20, min_duration=1/16,max_height=G5,irregular_groups=true"
                .parse()
                .unwrap();
        assert_eq!(p.max_played_notes, 20);
        assert_eq!(p.min_duration, "1/16");
        assert_eq!(p.max_height, "G5");
        assert!(p.irregular_groups);
        assert_eq!(p.max_chord_notes, InstrumentParams::default().max_chord_notes);

        assert!(matches!(
            "bogus=1".parse::<InstrumentParams>(),
            Err(ConfigError::MalformedInstrumentSpec { .. })
        ));
        assert!(matches!(
            "min_delay".parse::<InstrumentParams>(),
            Err(ConfigError::MalformedInstrumentSpec { .. })
        ));
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let config = GeneratorConfig {
            instruments_number: 3,
            ..config_with(vec![InstrumentParams::default(), InstrumentParams::default()])
        };
        assert!(matches!(
            ScorePlan::from_config(&config),
            Err(ConfigError::InstrumentCountMismatch {
                declared: 3,
                supplied: 2
            })
        ));
    }

    #[test]
    fn test_duration_validation() {
        let bad = |min: &str, max: &str| {
            let params = InstrumentParams {
                min_duration: min.to_string(),
                max_duration: max.to_string(),
                ..InstrumentParams::default()
            };
            ScorePlan::from_config(&config_with(vec![params])).unwrap_err()
        };
        assert!(matches!(bad("1/0", "1/1"), ConfigError::NonPositiveDenominator { .. }));
        assert!(matches!(bad("1/-8", "1/1"), ConfigError::NonPositiveDenominator { .. }));
        assert!(matches!(bad("3/8", "1/1"), ConfigError::UnsupportedDuration { .. }));
        assert!(matches!(bad("eighth", "1/1"), ConfigError::MalformedFraction { .. }));
        assert!(matches!(bad("1/1", "1/8"), ConfigError::InvalidDurationBounds { .. }));
    }

    #[test]
    fn test_no_room_for_events() {
        // A whole note never fits a 1:4 measure.
        let params = InstrumentParams {
            min_duration: "1/1".to_string(),
            max_duration: "1/1".to_string(),
            ..InstrumentParams::default()
        };
        let config = GeneratorConfig {
            meter: "1:4".to_string(),
            ..config_with(vec![params])
        };
        assert!(matches!(
            ScorePlan::from_config(&config),
            Err(ConfigError::NoRoomForEvents { .. })
        ));
    }

    #[test]
    fn test_inverted_register_rejected() {
        let params = InstrumentParams {
            min_height: "D5".to_string(),
            max_height: "B4".to_string(),
            ..InstrumentParams::default()
        };
        assert!(matches!(
            ScorePlan::from_config(&config_with(vec![params])),
            Err(ConfigError::InvertedRegister { .. })
        ));
    }

    #[test]
    fn test_register_octave_bounds() {
        assert_eq!(Register::parse("C-1").unwrap().octave, -1);
        assert_eq!(Register::parse("B10").unwrap().octave, 10);
        assert!(Register::parse("C-2").is_none());
        assert!(Register::parse("C11").is_none());
        assert!(Register::parse("C99999999").is_none());

        let params = InstrumentParams {
            max_height: "C99999999".to_string(),
            ..InstrumentParams::default()
        };
        assert!(matches!(
            ScorePlan::from_config(&config_with(vec![params])),
            Err(ConfigError::InvalidRegister { instrument: 1, .. })
        ));
    }

    #[test]
    fn test_track_length_overflow_rejected() {
        let config = GeneratorConfig {
            track_length: u64::MAX,
            ..config_with(vec![InstrumentParams::default()])
        };
        assert!(matches!(
            ScorePlan::from_config(&config),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_events_per_measure_overflow_rejected() {
        // 4e9 whole notes per bar, split into halves, overflows a u32 count.
        let params = InstrumentParams {
            min_duration: "1/2".to_string(),
            max_duration: "1/1".to_string(),
            ..InstrumentParams::default()
        };
        let config = GeneratorConfig {
            meter: "4000000000:1".to_string(),
            ..config_with(vec![params])
        };
        assert!(matches!(
            ScorePlan::from_config(&config),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_piece_shorter_than_a_measure_rejected() {
        // 1 s at 108 bpm is under two beats.
        let config = GeneratorConfig {
            track_length: 1,
            ..config_with(vec![InstrumentParams::default()])
        };
        match ScorePlan::from_config(&config) {
            Err(ConfigError::ZeroParameter { field }) => assert!(field.starts_with("measures")),
            other => panic!("expected zero measures to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_derivation() {
        let params = InstrumentParams {
            min_duration: "1/8".to_string(),
            max_duration: "1/1".to_string(),
            ..InstrumentParams::default()
        };
        let config = GeneratorConfig {
            track_length: 120,
            bpm: 108,
            ..config_with(vec![params])
        };
        let plan = ScorePlan::from_config(&config).unwrap();
        // 120 s at 108 bpm is 216 beats, 54 bars of 4:4.
        assert_eq!(plan.measures_count, 54);
        let inst = &plan.instruments[0];
        assert_eq!(inst.number, 1);
        assert_eq!(inst.max_events_per_measure, 8);
        assert_eq!(inst.durations.len(), 4);
        assert_eq!(inst.min_duration(), Ratio::new(1, 8));
        assert_eq!(inst.max_duration(), Ratio::new(1, 1));
    }

    #[test]
    fn test_json_defaults_and_alias() {
        let config =
            GeneratorConfig::from_json_str(r#"{"metre": "6:8", "seed": 7}"#).unwrap();
        assert_eq!(config.meter, "6:8");
        assert_eq!(config.seed, 7);
        assert_eq!(config.title, "Title");
        assert_eq!(config.instruments.len(), 1);
        assert!(matches!(
            GeneratorConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
