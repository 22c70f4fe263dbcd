// IEEE 1599 Score Generator: CLI entry point.
//
// Generates a random IEEE 1599 document from tempo, meter, length and
// per-instrument parameters and writes it as XML (optionally also as JSON).
// Parameters come from an optional JSON config file; flags override it, and
// `--instrument` flags replace the file's instrument list.
//
// Usage:
//   cargo run -p ieee1599_gen -- --track-length 60 --bpm 90 --meter 3:4 \
//     --instruments-number 2 \
//     --instrument "min_duration=1/16,max_duration=1/2,min_height=C3,max_height=G5" \
//     --instrument "max_chord_notes=4,irregular_groups=true" \
//     --output score.xml [--json score.json] [--seed N] [--strict] [--quiet]

use anyhow::{Context, Result};
use clap::Parser;
use ieee1599_gen::assemble::DocumentAssembler;
use ieee1599_gen::config::{GeneratorConfig, InstrumentParams, ScorePlan};
use ieee1599_gen::xml::write_xml;
use std::path::PathBuf;

/// Generate a random IEEE 1599 score document
#[derive(Parser)]
#[command(name = "generate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file with generation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document creator name
    #[arg(long)]
    creator: Option<String>,

    /// Piece title
    #[arg(long)]
    title: Option<String>,

    /// Piece author
    #[arg(long)]
    author: Option<String>,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Track length in seconds
    #[arg(long)]
    track_length: Option<u64>,

    /// Tempo in beats per minute
    #[arg(long)]
    bpm: Option<u32>,

    /// Meter as <beats>:<beat unit>, e.g. 6:8
    #[arg(long, alias = "metre")]
    meter: Option<String>,

    /// Number of instruments
    #[arg(long)]
    instruments_number: Option<usize>,

    /// Instrument parameters as key=value pairs, once per instrument
    #[arg(long = "instrument", value_parser = parse_instrument)]
    instruments: Vec<InstrumentParams>,

    /// Output XML path
    #[arg(short, long, default_value = "ieee1599.xml")]
    output: PathBuf,

    /// Also dump the document tree as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Fail instead of writing placeholder durations for uncoverable measures
    #[arg(long)]
    strict: bool,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn parse_instrument(spec: &str) -> std::result::Result<InstrumentParams, String> {
    spec.parse().map_err(|e: ieee1599_gen::ConfigError| e.to_string())
}

impl Cli {
    fn into_config(self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GeneratorConfig::from_json_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };
        if let Some(v) = self.creator {
            config.creator = v;
        }
        if let Some(v) = self.title {
            config.title = v;
        }
        if let Some(v) = self.author {
            config.author = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.track_length {
            config.track_length = v;
        }
        if let Some(v) = self.bpm {
            config.bpm = v;
        }
        if let Some(v) = self.meter {
            config.meter = v;
        }
        if !self.instruments.is_empty() {
            config.instruments_number = self.instruments.len();
            config.instruments = self.instruments;
        }
        if let Some(v) = self.instruments_number {
            config.instruments_number = v;
        }
        config.strict_durations |= self.strict;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let output = cli.output.clone();
    let json_path = cli.json.clone();
    let stages = if json_path.is_some() { 4 } else { 3 };
    let say = |line: String| {
        if !quiet {
            println!("{line}");
        }
    };

    let config = cli.into_config()?;
    say("=== IEEE 1599 Score Generator ===".to_string());
    say(format!("Meter: {}", config.meter));
    say(format!("Tempo: {} BPM", config.bpm));
    say(format!("Length: {}s", config.track_length));
    say(format!("Seed: {}", config.seed));
    say(String::new());

    say(format!("[1/{stages}] Validating parameters..."));
    let plan = ScorePlan::from_config(&config).context("invalid generation parameters")?;
    say(format!(
        "  {} instrument(s), {} measure(s) of {}",
        plan.instruments.len(),
        plan.measures_count,
        plan.meter
    ));
    for inst in &plan.instruments {
        say(format!(
            "  Instrument {}: {}..{}, 1/{}..1/{}, up to {} events per measure",
            inst.number,
            inst.min_register,
            inst.max_register,
            inst.max_duration_den,
            inst.min_duration_den,
            inst.max_events_per_measure
        ));
    }

    say(format!("[2/{stages}] Generating document..."));
    let generation = DocumentAssembler::new(&plan)
        .run()
        .context("generation aborted")?;
    let report = &generation.report;
    say(format!(
        "  {} spine events, {} chords ({} noteheads, {} tuplets), {} rests",
        report.events, report.chords, report.noteheads, report.tuplets, report.rests
    ));
    for degraded in &report.degraded {
        eprintln!(
            "  Warning: measure {} of instrument {} cannot be covered by {} durations; \
             wrote placeholders",
            degraded.measure, degraded.instrument, degraded.slots
        );
    }

    say(format!("[3/{stages}] Writing XML to {}...", output.display()));
    write_xml(&generation.document, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    if let Some(path) = json_path {
        say(format!("[4/{stages}] Writing JSON to {}...", path.display()));
        let json = serde_json::to_string_pretty(&generation.document)
            .context("serializing document")?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    say("  Done!".to_string());
    Ok(())
}
