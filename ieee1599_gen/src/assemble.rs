// Document assembly: the generation pipeline end to end.
//
// `generate` validates the config into a `ScorePlan` and hands it to a
// `DocumentAssembler`, which owns the single `ScoreRng` and the
// `EventRegistry` for the run. The pipeline:
//
// 1. Seed the spine (no draws), then allocate every measure's slot events.
// 2. For each instrument in order: draw its clef, then walk its measures.
//    Per measure, plan the note/rest roles, solve the durations, and build
//    one chord or rest per slot. Each content element looks its event up by
//    derived ID (a miss is a `SpineLookup` error, never a default) and
//    writes the event's timing/hpos.
// 3. Snapshot the spine into the document.
//
// The draw order inside step 2 is fixed: roles, durations, then per slot
// chord size, tuplet, and per notehead the four pitch draws. Any change to
// it changes the document produced for a seed.
//
// A measure whose budget cannot be covered by its slot count is degraded by
// default: its elements get placeholder durations and zero timing, and it is
// listed in the `GenerationReport`. With `strict_durations` it aborts the run.

use crate::config::{GeneratorConfig, Instrument, ScorePlan};
use crate::document::{
    Chord, Clef, DOCUMENT_VERSION, Document, DurationValue, General, Logic, Los, Measure,
    Notehead, Part, Pitch, Rest, SpineEvent, Staff, TimeSignature, Voice, VoiceContent,
    VoiceItem,
};
use crate::duration::{Duration, solve_durations};
use crate::error::GenerateError;
use crate::pitch::PitchResolver;
use crate::planner::{SlotRole, plan_measure};
use crate::spine::{EventId, EventRegistry};
use crate::tables::{CLEF_SHAPES, CLEF_STAFF_STEPS, SpellingTable};
use crate::tuplet::{IrregularGroupAnnotator, TupletRatio};
use ieee1599_prng::ScoreRng;
use serde::Serialize;
use std::collections::VecDeque;

const STAFF_LINES: u32 = 5;

/// A measure written with placeholder durations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DegradedMeasure {
    pub instrument: usize,
    pub measure: usize,
    pub slots: usize,
}

/// Summary of a generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub instruments: usize,
    pub measures: usize,
    pub events: usize,
    pub chords: usize,
    pub rests: usize,
    pub noteheads: usize,
    pub tuplets: usize,
    pub degraded: Vec<DegradedMeasure>,
}

#[derive(Clone, Debug)]
pub struct Generation {
    pub document: Document,
    pub report: GenerationReport,
}

/// Validate `config` and generate its document.
pub fn generate(config: &GeneratorConfig) -> Result<Generation, GenerateError> {
    let plan = ScorePlan::from_config(config)?;
    DocumentAssembler::new(&plan).run()
}

pub struct DocumentAssembler<'a> {
    plan: &'a ScorePlan,
    rng: ScoreRng,
    registry: EventRegistry,
    spellings: SpellingTable,
    annotator: IrregularGroupAnnotator,
    report: GenerationReport,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(plan: &'a ScorePlan) -> Self {
        DocumentAssembler {
            plan,
            rng: ScoreRng::new(plan.seed),
            registry: EventRegistry::new(),
            spellings: SpellingTable::new(),
            annotator: IrregularGroupAnnotator::new(plan.meter),
            report: GenerationReport {
                seed: plan.seed,
                instruments: plan.instruments.len(),
                measures: plan.measures_count,
                ..GenerationReport::default()
            },
        }
    }

    pub fn run(mut self) -> Result<Generation, GenerateError> {
        let plan = self.plan;
        let max_events: Vec<u32> = plan
            .instruments
            .iter()
            .map(|i| i.max_events_per_measure)
            .collect();
        self.registry.allocate_seed_events(plan.instruments.len());
        self.registry
            .allocate_measure_events(&mut self.rng, plan.measures_count, &max_events);

        let mut staff_list = Vec::with_capacity(plan.instruments.len());
        let mut parts = Vec::with_capacity(plan.instruments.len());
        for instrument in &plan.instruments {
            staff_list.push(self.build_staff(instrument));
            parts.push(self.build_part(instrument)?);
        }

        let spine: Vec<SpineEvent> = self
            .registry
            .events()
            .iter()
            .map(|e| SpineEvent {
                id: e.id.to_string(),
                timing: e.timing,
                hpos: e.hpos,
            })
            .collect();
        self.report.events = spine.len();

        let document = Document {
            creator: plan.creator.clone(),
            version: DOCUMENT_VERSION.to_string(),
            general: General {
                main_title: plan.title.clone(),
                author: plan.author.clone(),
            },
            logic: Logic {
                spine,
                los: Los { staff_list, parts },
            },
        };
        Ok(Generation {
            document,
            report: self.report,
        })
    }

    fn build_staff(&mut self, instrument: &Instrument) -> Staff {
        let n = instrument.number;
        // Index draws, identical to `choose` on these non-empty tables.
        let shape = CLEF_SHAPES[self.rng.range_usize(0, CLEF_SHAPES.len())];
        let staff_step = CLEF_STAFF_STEPS[self.rng.range_usize(0, CLEF_STAFF_STEPS.len())];
        Staff {
            id: format!("Instrument_{n}_staff"),
            line_number: STAFF_LINES,
            time_signature: TimeSignature {
                event_ref: EventId::TimeSignature { instrument: n }.to_string(),
                num: self.plan.meter.num,
                den: self.plan.meter.den,
            },
            clef: Clef {
                event_ref: EventId::Clef { instrument: n }.to_string(),
                shape,
                staff_step,
                octave_num: 0,
            },
        }
    }

    fn build_part(&mut self, instrument: &Instrument) -> Result<Part, GenerateError> {
        let n = instrument.number;
        let voice_item = VoiceItem {
            id: format!("Instrument_{n}_0_voice"),
            staff_ref: format!("Instrument_{n}_staff"),
        };
        let mut measures = Vec::with_capacity(self.plan.measures_count);
        for measure in 1..=self.plan.measures_count {
            let content = self.build_measure(instrument, measure)?;
            measures.push(Measure {
                number: measure,
                voice: Voice {
                    voice_item_ref: voice_item.id.clone(),
                    content,
                },
            });
        }
        Ok(Part {
            id: format!("Instrument_{n}"),
            voice_item,
            measures,
        })
    }

    fn build_measure(
        &mut self,
        instrument: &Instrument,
        measure: usize,
    ) -> Result<Vec<VoiceContent>, GenerateError> {
        let n = instrument.number;
        let slots = self.registry.slot_count(n, measure);
        if slots == 0 {
            return Ok(Vec::new());
        }
        let roles = plan_measure(
            &mut self.rng,
            slots,
            instrument.max_played_notes,
            self.plan.measures_count,
        );

        let solved = solve_durations(
            &mut self.rng,
            self.plan.meter.budget(),
            &instrument.durations,
            slots,
        );
        let mut queue: VecDeque<Duration> = match solved {
            Some(durations) => durations.into(),
            None if self.plan.strict_durations => {
                return Err(GenerateError::InfeasibleMeasure {
                    seed: self.plan.seed,
                    instrument: n,
                    measure,
                    slots,
                });
            }
            None => {
                self.report.degraded.push(DegradedMeasure {
                    instrument: n,
                    measure,
                    slots,
                });
                VecDeque::new()
            }
        };

        let resolver = PitchResolver::new(
            &self.spellings,
            instrument.min_register,
            instrument.max_register,
        );
        let mut content = Vec::with_capacity(slots);
        for (slot, role) in roles.into_iter().enumerate() {
            let id = EventId::Slot {
                instrument: n,
                measure,
                slot,
            };
            let duration = queue.pop_front();
            let written = duration.map(|d| self.written_duration(d));
            let vtu = match written {
                Some((_, den)) if slot > 0 => {
                    self.event_timing(instrument, den)
                        .ok_or_else(|| GenerateError::Arithmetic {
                            seed: self.plan.seed,
                            instrument: n,
                            measure,
                            slot,
                            reason: format!(
                                "timing {} x (1/{} over 1/{den}) is not representable",
                                instrument.min_delay, instrument.min_duration_den
                            ),
                        })?
                }
                _ => 0,
            };
            if self.registry.set_timing(&id, vtu).is_none() {
                return Err(GenerateError::SpineLookup {
                    seed: self.plan.seed,
                    instrument: n,
                    measure,
                    slot,
                });
            }

            let event_ref = id.to_string();
            match role {
                SlotRole::Note => {
                    let size = self.rng.range_u32_inclusive(1, instrument.max_chord_notes);
                    let tuplet = duration.and_then(|d| {
                        self.annotator
                            .annotate(&mut self.rng, d, instrument.irregular_groups)
                    });
                    let mut noteheads = Vec::with_capacity(size as usize);
                    for _ in 0..size {
                        let pitch = resolver.resolve(&mut self.rng).ok_or_else(|| {
                            GenerateError::Arithmetic {
                                seed: self.plan.seed,
                                instrument: n,
                                measure,
                                slot,
                                reason: "resolved pitch class has no spelling".to_string(),
                            }
                        })?;
                        noteheads.push(Notehead {
                            pitch: Pitch {
                                step: pitch.step(),
                                octave: pitch.octave,
                                actual_accidental: pitch.actual_accidental(),
                            },
                            printed_accidental: pitch.printed_accidental(),
                        });
                    }
                    self.report.chords += 1;
                    self.report.noteheads += noteheads.len();
                    if tuplet.is_some() {
                        self.report.tuplets += 1;
                    }
                    content.push(VoiceContent::Chord(Chord {
                        event_ref,
                        duration: duration_value(written, tuplet),
                        noteheads,
                    }));
                }
                SlotRole::Rest => {
                    self.report.rests += 1;
                    content.push(VoiceContent::Rest(Rest {
                        event_ref,
                        duration: duration_value(written, None),
                    }));
                }
            }
        }
        Ok(content)
    }

    /// Written (num, den) of a duration. A full-measure duration is written
    /// as the meter itself.
    fn written_duration(&self, d: Duration) -> (u32, u32) {
        if d == self.plan.meter.budget() {
            (self.plan.meter.num, self.plan.meter.den)
        } else {
            (*d.numer(), *d.denom())
        }
    }

    /// `min_delay * (min_duration_den / written_den)` VTU.
    fn event_timing(&self, instrument: &Instrument, written_den: u32) -> Option<u64> {
        let ratio = instrument.min_duration_den.checked_div(written_den)?;
        instrument.min_delay.checked_mul(u64::from(ratio))
    }
}

fn duration_value(
    written: Option<(u32, u32)>,
    tuplet: Option<TupletRatio>,
) -> DurationValue {
    match written {
        Some((num, den)) => DurationValue::Written { num, den, tuplet },
        None => DurationValue::Placeholder,
    }
}
