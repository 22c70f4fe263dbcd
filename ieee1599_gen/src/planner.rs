// Note/rest planning for one (instrument, measure).
//
// Draws how many notes the instrument "wants" over the whole piece, spreads
// that evenly across measures, clamps to the slots available and pads with
// rests. The tag sequence is shuffled and consumed slot by slot.

use ieee1599_prng::ScoreRng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SlotRole {
    Note,
    Rest,
}

/// Plan the roles of `slots` slots.
///
/// Draws nothing when `slots == 0`. Otherwise draws the wanted note count in
/// `[1, max_played_notes]` and then shuffles the tags.
pub fn plan_measure(
    rng: &mut ScoreRng,
    slots: usize,
    max_played_notes: u32,
    measures_count: usize,
) -> Vec<SlotRole> {
    if slots == 0 {
        return Vec::new();
    }
    let wanted = rng.range_u32_inclusive(1, max_played_notes.max(1)) as usize;
    let notes = (wanted / measures_count.max(1)).min(slots);
    let mut roles = vec![SlotRole::Note; notes];
    roles.resize(slots, SlotRole::Rest);
    rng.shuffle(&mut roles);
    roles
}
