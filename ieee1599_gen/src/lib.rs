// IEEE 1599 Score Generator
//
// Builds a random but internally consistent IEEE 1599 symbolic-music
// document from a handful of parameters: tempo, meter, piece length and, per
// instrument, register, polyphony and duration bounds. Every chord and rest
// is anchored to exactly one spine event, and every measure's durations sum
// exactly to the meter.
//
// Architecture:
// - config.rs: Parameters, meter/fraction/register parsing, validation into a
//   `ScorePlan`
// - error.rs: `ConfigError` and `GenerateError`
// - tables.rs: Accidentals, canonical spellings, clef and tuplet tables
// - spine.rs: Event registry (IDs, seed/steady allocation phases)
// - planner.rs: Note/rest role planning per measure
// - duration.rs: Exact covering of a measure budget with N durations
// - pitch.rs: Height sampling and enharmonic spelling
// - tuplet.rs: Irregular-group annotation
// - document.rs: Typed output tree
// - assemble.rs: The generation pipeline and `generate()` entry point
// - xml.rs: XML text output
//
// The generator is deterministic given a seed: all randomness flows through
// one `ieee1599_prng::ScoreRng` in a fixed draw order.

pub mod assemble;
pub mod config;
pub mod document;
pub mod duration;
pub mod error;
pub mod pitch;
pub mod planner;
pub mod spine;
pub mod tables;
pub mod tuplet;
pub mod xml;

pub use assemble::{DegradedMeasure, Generation, GenerationReport, generate};
pub use config::{GeneratorConfig, InstrumentParams, ScorePlan};
pub use error::{ConfigError, GenerateError};
