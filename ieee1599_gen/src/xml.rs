// XML text output for generated documents.
//
// Walks the `Document` tree and writes one element per line with 3-space
// indentation, an XML declaration first. Elements without children are
// written self-closing. Attribute values and text are escaped; everything
// else (IDs, numbers, accidental names) is ASCII by construction.

use crate::document::{
    Chord, Document, DurationValue, Notehead, Part, Rest, Staff, VoiceContent,
};
use std::fmt::Write;
use std::path::Path;

const INDENT: &str = "   ";

/// Escape the five XML special characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        XmlWriter {
            out: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n"),
            depth: 0,
        }
    }

    fn start_tag(&mut self, name: &str, attrs: &[(&str, String)]) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        let _ = write!(self.out, "<{name}");
        for (key, value) in attrs {
            let _ = write!(self.out, " {key}=\"{}\"", escape(value));
        }
    }

    fn open(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.start_tag(name, attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.start_tag(name, attrs);
        self.out.push_str("/>\n");
    }

    fn text(&mut self, name: &str, text: &str) {
        self.start_tag(name, &[]);
        let _ = writeln!(self.out, ">{}</{name}>", escape(text));
    }

    fn close(&mut self, name: &str) {
        self.depth -= 1;
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        let _ = writeln!(self.out, "</{name}>");
    }
}

/// Render a document as XML text.
pub fn to_xml_string(doc: &Document) -> String {
    let mut w = XmlWriter::new();
    w.open(
        "ieee1599",
        &[
            ("creator", doc.creator.clone()),
            ("version", doc.version.clone()),
        ],
    );

    w.open("general", &[]);
    w.open("description", &[]);
    w.text("main_title", &doc.general.main_title);
    w.text("author", &doc.general.author);
    w.close("description");
    w.close("general");

    w.open("logic", &[]);
    w.open("spine", &[]);
    for event in &doc.logic.spine {
        let mut attrs = vec![("id", event.id.clone())];
        if let Some(timing) = event.timing {
            attrs.push(("timing", timing.to_string()));
        }
        if let Some(hpos) = event.hpos {
            attrs.push(("hpos", hpos.to_string()));
        }
        w.empty("event", &attrs);
    }
    w.close("spine");

    w.open("los", &[]);
    w.open("staff_list", &[]);
    for staff in &doc.logic.los.staff_list {
        write_staff(&mut w, staff);
    }
    w.close("staff_list");
    for part in &doc.logic.los.parts {
        write_part(&mut w, part);
    }
    w.close("los");
    w.close("logic");

    w.close("ieee1599");
    w.out
}

fn write_staff(w: &mut XmlWriter, staff: &Staff) {
    w.open(
        "staff",
        &[
            ("id", staff.id.clone()),
            ("line_number", staff.line_number.to_string()),
        ],
    );
    let ts = &staff.time_signature;
    w.open("time_signature", &[("event_ref", ts.event_ref.clone())]);
    w.empty(
        "time_indication",
        &[("num", ts.num.to_string()), ("den", ts.den.to_string())],
    );
    w.close("time_signature");
    let clef = &staff.clef;
    w.empty(
        "clef",
        &[
            ("event_ref", clef.event_ref.clone()),
            ("shape", clef.shape.to_string()),
            ("staff_step", clef.staff_step.to_string()),
            ("octave_num", clef.octave_num.to_string()),
        ],
    );
    w.close("staff");
}

fn write_part(w: &mut XmlWriter, part: &Part) {
    w.open("part", &[("id", part.id.clone())]);
    w.open("voice_list", &[]);
    w.empty(
        "voice_item",
        &[
            ("id", part.voice_item.id.clone()),
            ("staff_ref", part.voice_item.staff_ref.clone()),
        ],
    );
    w.close("voice_list");
    for measure in &part.measures {
        w.open("measure", &[("number", measure.number.to_string())]);
        let voice_ref = [("voice_item_ref", measure.voice.voice_item_ref.clone())];
        if measure.voice.content.is_empty() {
            w.empty("voice", &voice_ref);
        } else {
            w.open("voice", &voice_ref);
            for content in &measure.voice.content {
                match content {
                    VoiceContent::Chord(chord) => write_chord(w, chord),
                    VoiceContent::Rest(rest) => write_rest(w, rest),
                }
            }
            w.close("voice");
        }
        w.close("measure");
    }
    w.close("part");
}

fn write_chord(w: &mut XmlWriter, chord: &Chord) {
    w.open("chord", &[("event_ref", chord.event_ref.clone())]);
    write_duration(w, &chord.duration);
    for notehead in &chord.noteheads {
        write_notehead(w, notehead);
    }
    w.close("chord");
}

fn write_rest(w: &mut XmlWriter, rest: &Rest) {
    w.open("rest", &[("event_ref", rest.event_ref.clone())]);
    write_duration(w, &rest.duration);
    w.close("rest");
}

fn write_duration(w: &mut XmlWriter, duration: &DurationValue) {
    match duration {
        DurationValue::Placeholder => w.empty("duration", &[]),
        DurationValue::Written { num, den, tuplet } => {
            let attrs = [("num", num.to_string()), ("den", den.to_string())];
            match tuplet {
                None => w.empty("duration", &attrs),
                Some(t) => {
                    w.open("duration", &attrs);
                    w.empty(
                        "tuplet_ratio",
                        &[
                            ("enter_num", t.enter_num.to_string()),
                            ("enter_den", t.enter_den.to_string()),
                            ("in_num", t.in_num.to_string()),
                            ("in_den", t.in_den.to_string()),
                        ],
                    );
                    w.close("duration");
                }
            }
        }
    }
}

fn write_notehead(w: &mut XmlWriter, notehead: &Notehead) {
    w.open("notehead", &[]);
    let pitch = &notehead.pitch;
    w.empty(
        "pitch",
        &[
            ("step", pitch.step.letter().to_string()),
            ("octave", pitch.octave.to_string()),
            ("actual_accidental", pitch.actual_accidental.name().to_string()),
        ],
    );
    if let Some(acc) = notehead.printed_accidental {
        w.open("printed_accidentals", &[]);
        w.empty(acc.name(), &[]);
        w.close("printed_accidentals");
    }
    w.close("notehead");
}

/// Write a document to `path` as XML.
pub fn write_xml(doc: &Document, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, to_xml_string(doc))
}
