// Irregular-group (tuplet) annotation of chord durations.
//
// The meter picks one of two fixed tables (see `tables.rs`): compound meters
// (numerator divisible by 3, even denominator) use the compound table, all
// others the simple one. A group of `n` entered notes is written against
// `meter.den * divisor(n)`.

use crate::config::Meter;
use crate::tables::{COMPOUND_IRREGULAR_GROUPS, SIMPLE_IRREGULAR_GROUPS};
use ieee1599_prng::ScoreRng;
use num_rational::Ratio;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MeterKind {
    Simple,
    Compound,
}

impl MeterKind {
    pub fn of(meter: Meter) -> MeterKind {
        if meter.is_compound() {
            MeterKind::Compound
        } else {
            MeterKind::Simple
        }
    }
}

/// Group size -> base divisor, for one meter kind.
#[derive(Clone, Debug)]
pub struct IrregularGroupTable {
    kind: MeterKind,
    sizes: Vec<u32>,
    entries: &'static [(u32, u32)],
}

impl IrregularGroupTable {
    pub fn for_meter(meter: Meter) -> Self {
        let kind = MeterKind::of(meter);
        let entries: &'static [(u32, u32)] = match kind {
            MeterKind::Compound => &COMPOUND_IRREGULAR_GROUPS,
            MeterKind::Simple => &SIMPLE_IRREGULAR_GROUPS,
        };
        IrregularGroupTable {
            kind,
            sizes: entries.iter().map(|&(size, _)| size).collect(),
            entries,
        }
    }

    pub fn kind(&self) -> MeterKind {
        self.kind
    }

    /// Group sizes, ascending.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn divisor(&self, size: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|&&(s, _)| s == size)
            .map(|&(_, d)| d)
    }
}

/// Entered/written ratio pair of a tuplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TupletRatio {
    pub enter_num: u32,
    pub enter_den: u32,
    pub in_num: u32,
    pub in_den: u32,
}

pub struct IrregularGroupAnnotator {
    meter: Meter,
    table: IrregularGroupTable,
}

impl IrregularGroupAnnotator {
    pub fn new(meter: Meter) -> Self {
        IrregularGroupAnnotator {
            meter,
            table: IrregularGroupTable::for_meter(meter),
        }
    }

    pub fn table(&self) -> &IrregularGroupTable {
        &self.table
    }

    /// Maybe attach a tuplet to a chord of length `duration`.
    ///
    /// Draws nothing when `enabled` is false. Otherwise flips a coin and, on
    /// heads, picks a group size.
    pub fn annotate(
        &self,
        rng: &mut ScoreRng,
        duration: Ratio<u32>,
        enabled: bool,
    ) -> Option<TupletRatio> {
        if !enabled || !rng.coin_flip() {
            return None;
        }
        let size = *rng.choose(self.table.sizes())?;
        let divisor = self.table.divisor(size)?;
        let in_den = if duration == self.meter.budget() {
            self.meter.den
        } else {
            *duration.denom()
        };
        Some(TupletRatio {
            enter_num: size,
            enter_den: self.meter.den.checked_mul(divisor)?,
            in_num: 1,
            in_den,
        })
    }
}
