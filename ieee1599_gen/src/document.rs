// Typed model of the generated IEEE 1599 document.
//
// Mirrors the element tree one struct per element:
//
//   ieee1599(creator, version)
//     general/description/{main_title, author}
//     logic
//       spine/event*(id, timing, hpos)
//       los
//         staff_list/staff*(id, line_number)/{time_signature, clef}
//         part*(id)/{voice_list/voice_item, measure*(number)/voice/(chord|rest)*}
//
// The assembler builds it, `xml.rs` renders it, and the whole tree derives
// `Serialize` for the JSON dump. All references (`event_ref`, `staff_ref`,
// `voice_item_ref`) are stored as the literal ID strings that appear in the
// output.

use crate::tables::{Accidental, Step};
use crate::tuplet::TupletRatio;
use serde::Serialize;

pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    pub creator: String,
    pub version: String,
    pub general: General,
    pub logic: Logic,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct General {
    pub main_title: String,
    pub author: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Logic {
    pub spine: Vec<SpineEvent>,
    pub los: Los,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpineEvent {
    pub id: String,
    pub timing: Option<u64>,
    pub hpos: Option<u64>,
}

/// Logically organized symbols.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Los {
    pub staff_list: Vec<Staff>,
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Staff {
    pub id: String,
    pub line_number: u32,
    pub time_signature: TimeSignature,
    pub clef: Clef,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSignature {
    pub event_ref: String,
    pub num: u32,
    pub den: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Clef {
    pub event_ref: String,
    pub shape: char,
    pub staff_step: u32,
    pub octave_num: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Part {
    pub id: String,
    pub voice_item: VoiceItem,
    pub measures: Vec<Measure>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VoiceItem {
    pub id: String,
    pub staff_ref: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measure {
    pub number: usize,
    pub voice: Voice,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Voice {
    pub voice_item_ref: String,
    pub content: Vec<VoiceContent>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceContent {
    Chord(Chord),
    Rest(Rest),
}

impl VoiceContent {
    pub fn event_ref(&self) -> &str {
        match self {
            VoiceContent::Chord(c) => &c.event_ref,
            VoiceContent::Rest(r) => &r.event_ref,
        }
    }

    pub fn duration(&self) -> &DurationValue {
        match self {
            VoiceContent::Chord(c) => &c.duration,
            VoiceContent::Rest(r) => &r.duration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chord {
    pub event_ref: String,
    pub duration: DurationValue,
    pub noteheads: Vec<Notehead>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rest {
    pub event_ref: String,
    pub duration: DurationValue,
}

/// A written duration, or an empty placeholder in a measure whose budget
/// could not be covered.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationValue {
    Placeholder,
    Written {
        num: u32,
        den: u32,
        tuplet: Option<TupletRatio>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notehead {
    pub pitch: Pitch,
    pub printed_accidental: Option<Accidental>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pitch {
    pub step: Step,
    pub octave: i32,
    pub actual_accidental: Accidental,
}
