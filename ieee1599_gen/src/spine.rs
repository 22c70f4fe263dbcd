// The event spine: every addressable time-point of the piece.
//
// Each chord, rest, clef and time signature in the document points at exactly
// one spine event by ID. IDs are derived from (instrument, measure, slot) so
// they are unique by construction; the registry keeps creation order for the
// `<spine>` listing and a hash index for lookups.
//
// Allocation happens in two passes, both before any content is built:
// 1. `allocate_seed_events` creates, per instrument, slot 0 of measure 1 plus
//    the time-signature and clef anchors (timing = hpos = 0). No draws.
// 2. `allocate_measure_events` walks the measures. For each it draws a
//    permutation of the instruments and, in that order, a slot count bounded
//    by the instrument's own max events per measure. The registry starts in
//    `SpinePhase::Seed`: the first measure's slots start at 1 because slot 0
//    was seeded. After measure 1 it moves to `SpinePhase::Steady` for good.
//
// Slot events are created without timing; the assembler fills it in when it
// builds the owning chord or rest.
//
// Instrument and measure numbers are 1-based throughout, slots 0-based.

use ieee1599_prng::ScoreRng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Address of a spine event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EventId {
    Slot {
        instrument: usize,
        measure: usize,
        slot: usize,
    },
    TimeSignature {
        instrument: usize,
    },
    Clef {
        instrument: usize,
    },
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EventId::Slot {
                instrument,
                measure,
                slot,
            } => write!(f, "Instrument_{instrument}_voice0_measure{measure}_ev{slot}"),
            EventId::TimeSignature { instrument } => {
                write!(f, "TimeSignature_Instrument_{instrument}_1")
            }
            EventId::Clef { instrument } => write!(f, "Clef_Instrument_{instrument}_1"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    /// VTU. `None` until the owning content element is built.
    pub timing: Option<u64>,
    pub hpos: Option<u64>,
}

/// Whether the seeded first slot of measure 1 is still ahead of allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinePhase {
    Seed,
    Steady,
}

#[derive(Debug)]
pub struct EventRegistry {
    events: Vec<Event>,
    index: HashMap<EventId, usize>,
    /// (instrument, measure) -> number of slots S.
    slot_counts: HashMap<(usize, usize), usize>,
    phase: SpinePhase,
}

impl EventRegistry {
    pub fn new() -> Self {
        EventRegistry {
            events: Vec::new(),
            index: HashMap::new(),
            slot_counts: HashMap::new(),
            phase: SpinePhase::Seed,
        }
    }

    pub fn phase(&self) -> SpinePhase {
        self.phase
    }

    fn push(&mut self, id: EventId, timing: Option<u64>) {
        debug_assert!(!self.index.contains_key(&id), "duplicate spine event {id}");
        self.index.insert(id, self.events.len());
        self.events.push(Event {
            id,
            timing,
            hpos: timing,
        });
    }

    /// Create the three anchor events of each instrument.
    pub fn allocate_seed_events(&mut self, instrument_count: usize) {
        for instrument in 1..=instrument_count {
            self.push(
                EventId::Slot {
                    instrument,
                    measure: 1,
                    slot: 0,
                },
                Some(0),
            );
            self.push(EventId::TimeSignature { instrument }, Some(0));
            self.push(EventId::Clef { instrument }, Some(0));
        }
    }

    /// Draw and create the slot events of every (instrument, measure).
    ///
    /// `max_events[i]` bounds the slot count of instrument `i + 1`. The count
    /// drawn for a pair is its total S, seeded slot included.
    pub fn allocate_measure_events(
        &mut self,
        rng: &mut ScoreRng,
        measures_count: usize,
        max_events: &[u32],
    ) {
        let instrument_count = max_events.len();
        if instrument_count == 0 {
            return;
        }
        for measure in 1..=measures_count {
            let first_slot = match self.phase {
                SpinePhase::Seed => 1,
                SpinePhase::Steady => 0,
            };
            let order = rng.sample_distinct(instrument_count, 0, instrument_count as u32 - 1);
            for index in order {
                let index = index as usize;
                let count = rng.range_u32_inclusive(1, max_events[index]) as usize;
                let instrument = index + 1;
                for slot in first_slot..count {
                    self.push(
                        EventId::Slot {
                            instrument,
                            measure,
                            slot,
                        },
                        None,
                    );
                }
                self.slot_counts.insert((instrument, measure), count);
            }
            self.phase = SpinePhase::Steady;
        }
    }

    /// Number of slots S allocated for (instrument, measure); 0 if none.
    pub fn slot_count(&self, instrument: usize, measure: usize) -> usize {
        self.slot_counts
            .get(&(instrument, measure))
            .copied()
            .unwrap_or(0)
    }

    pub fn lookup(&self, id: &EventId) -> Option<&Event> {
        self.index.get(id).map(|&i| &self.events[i])
    }

    /// Set timing and hpos of an existing event. `None` if it does not exist.
    pub fn set_timing(&mut self, id: &EventId, vtu: u64) -> Option<&Event> {
        let &i = self.index.get(id)?;
        let event = &mut self.events[i];
        event.timing = Some(vtu);
        event.hpos = Some(vtu);
        Some(event)
    }

    /// Events in creation order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
