//! Canonical bank model shared by both dialects.

use crate::parser::DialectKind;

/// Note count value written by a broken Caesar export in place of a real
/// count. It is a known-bad-data marker, never a real note count, and an
/// instrument carrying it is dropped from the bank.
pub const CORRUPT_NOTE_COUNT: i64 = 856_392_688;

/// Highest note count a Caesar instrument may declare.
pub const MAX_NOTE_COUNT: i64 = 128;

/// Amplitude envelope. Values are passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    pub attack: String,
    pub hold: String,
    pub decay: String,
    pub sustain: String,
    pub release: String,
}

impl Envelope {
    /// Envelope used for a SoundTool instrument that has no regions.
    pub fn fallback() -> Self {
        Self {
            attack: "127".to_string(),
            hold: "0".to_string(),
            decay: "127".to_string(),
            sustain: "127".to_string(),
            release: "127".to_string(),
        }
    }
}

/// A sample mapped to a key/velocity span.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Sample identifier as written in the source text.
    pub sample_name: String,
    /// Lowest key (inclusive).
    pub key_min: String,
    /// Highest key (inclusive).
    pub key_max: String,
    /// Root key for pitch-correct playback.
    pub original_key: String,
    /// Lowest velocity (inclusive).
    pub velocity_min: String,
    /// Highest velocity (inclusive).
    pub velocity_max: String,
    pub volume: String,
    pub pan: String,
    pub envelope: Envelope,
}

/// A named sound program owning its regions in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instrument {
    /// Name as emitted in the `Name` attribute.
    pub name: String,
    /// MIDI program number as emitted in `ProgramNo`.
    pub program_number: String,
    /// Declared note count. Only Caesar dumps carry one.
    pub note_count: Option<i64>,
    pub regions: Vec<Region>,
}

impl Instrument {
    /// Envelope of the first region, used as the instrument default.
    pub fn first_region_envelope(&self) -> Option<&Envelope> {
        self.regions.first().map(|r| &r.envelope)
    }
}

/// An instrument accepted for emission, with its resolved default envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankInstrument {
    pub instrument: Instrument,
    /// Instrument-level envelope; `None` omits the `Envelope` element.
    pub envelope: Option<Envelope>,
}

/// Normalized, emission-ready bank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bank {
    /// Dialect the bank was read from; decides the sample path policy.
    pub dialect: DialectKind,
    pub instruments: Vec<BankInstrument>,
}

impl Bank {
    /// Total number of regions across all instruments.
    pub fn num_regions(&self) -> usize {
        self.instruments
            .iter()
            .map(|i| i.instrument.regions.len())
            .sum()
    }

    /// Get a human-readable info string.
    pub fn info(&self) -> String {
        format!(
            "{} bank: {} instruments, {} regions",
            self.dialect,
            self.instruments.len(),
            self.num_regions()
        )
    }
}
