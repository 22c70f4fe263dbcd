// Error types for parameter validation and document generation.
//
// Two layers:
// - `ConfigError`: the caller's parameters are unusable. Always detected by
//   `ScorePlan::from_config` before the first PRNG draw, so nothing is generated
//   and the caller may retry with corrected input.
// - `GenerateError`: a generation run was aborted. Apart from wrapping a
//   `ConfigError`, these signal an internal invariant violation (a spine
//   event that should exist but does not, a non-representable duration) or,
//   in strict mode, a measure whose budget cannot be covered exactly. They
//   carry the seed and the failing (instrument, measure, slot) so the run can
//   be reproduced.
//
// Instrument and measure numbers in messages are 1-based, matching the IDs
// written to the document; slots are 0-based.

use thiserror::Error;

/// The caller's parameters cannot be turned into a generation plan.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed meter '{meter}': expected '<beats>:<beat unit>' with positive integers")]
    MalformedMeter { meter: String },
    #[error(
        "{supplied} instrument parameter sets supplied for {declared} declared instruments; \
         supply one parameter set per instrument"
    )]
    InstrumentCountMismatch { declared: usize, supplied: usize },
    #[error("instrument {instrument}: {field} '{value}' has a non-positive denominator")]
    NonPositiveDenominator {
        instrument: usize,
        field: &'static str,
        value: String,
    },
    #[error("instrument {instrument}: {field} '{value}' is not a fraction '<num>/<den>'")]
    MalformedFraction {
        instrument: usize,
        field: &'static str,
        value: String,
    },
    #[error("instrument {instrument}: {field} '{value}' must have numerator 1")]
    UnsupportedDuration {
        instrument: usize,
        field: &'static str,
        value: String,
    },
    #[error(
        "instrument {instrument}: max duration 1/{max_den} does not reach min duration \
         1/{min_den} by halving"
    )]
    InvalidDurationBounds {
        instrument: usize,
        min_den: u32,
        max_den: u32,
    },
    #[error("instrument {instrument}: min duration 1/{min_den} does not fit in a {meter} measure")]
    NoRoomForEvents {
        instrument: usize,
        min_den: u32,
        meter: String,
    },
    #[error("instrument {instrument}: register '{value}' is not a note name or MIDI number")]
    InvalidRegister { instrument: usize, value: String },
    #[error("instrument {instrument}: min register '{min}' lies above max register '{max}'")]
    InvertedRegister {
        instrument: usize,
        min: String,
        max: String,
    },
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },
    #[error("{field} must be at least 1")]
    ZeroParameter { field: String },
    #[error("malformed instrument spec '{spec}': {reason}")]
    MalformedInstrumentSpec { spec: String, reason: String },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A generation run was aborted.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(
        "spine lookup failed for instrument {instrument}, measure {measure}, slot {slot} \
         (seed {seed})"
    )]
    SpineLookup {
        seed: u64,
        instrument: usize,
        measure: usize,
        slot: usize,
    },
    #[error(
        "arithmetic error at instrument {instrument}, measure {measure}, slot {slot} \
         (seed {seed}): {reason}"
    )]
    Arithmetic {
        seed: u64,
        instrument: usize,
        measure: usize,
        slot: usize,
        reason: String,
    },
    #[error(
        "measure {measure} of instrument {instrument} cannot be covered exactly by {slots} \
         durations (seed {seed})"
    )]
    InfeasibleMeasure {
        seed: u64,
        instrument: usize,
        measure: usize,
        slots: usize,
    },
}
