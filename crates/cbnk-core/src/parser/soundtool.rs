//! SoundTool dump parser.
//!
//! ```text
//! InstrumentName=Inst_007
//! Sample=kick.wav
//! Z_LowKey=0
//! Z_HighKey=60
//! ```
//!
//! Lines are flat `Key=Value` pairs split on the first `=`. `InstrumentName`
//! opens an instrument, `Sample` opens a region, and every other pair is
//! recorded on the most recent region. The `Z_*` fields the bank document
//! needs are looked up once the whole instrument has been read.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::parser::{Dialect, DialectKind};
use crate::types::{Envelope, Instrument, Region};

/// Line prefix that opens an instrument.
pub(crate) const INSTRUMENT_KEY_PREFIX: &str = "InstrumentName=";

const INSTRUMENT_KEY: &str = "InstrumentName";
const SAMPLE_KEY: &str = "Sample";

/// Region fields every SoundTool region must carry.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "Z_LowKey",
    "Z_HighKey",
    "Z_overridingRootKey",
    "Z_LowVelocity",
    "Z_HighVelocity",
    "Z_pan",
    "Z_attackVolEnv",
    "Z_decayVolEnv",
    "Z_sustainVolEnv",
    "Z_holdVolEnv",
    "Z_releaseVolEnv",
];

/// SoundTool does not export a region volume the bank format understands.
const REGION_VOLUME: &str = "127";

static DIGITS: OnceLock<Regex> = OnceLock::new();

/// SoundTool dialect.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoundTool;

impl Dialect for SoundTool {
    fn kind(&self) -> DialectKind {
        DialectKind::SoundTool
    }

    fn parse(&self, content: &str) -> Result<Vec<Instrument>> {
        parse_soundtool(content)
    }

    fn fallback_envelope(&self) -> Option<Envelope> {
        Some(Envelope::fallback())
    }

    fn file_path(&self, sample_name: &str) -> String {
        sample_name.to_string()
    }
}

/// The `Key=Value` pairs recorded for one region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionFields {
    /// Value of the `Sample` line that opened the region.
    pub sample: String,
    fields: HashMap<String, String>,
}

impl RegionFields {
    pub fn new(sample: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            fields: HashMap::new(),
        }
    }

    /// Record a field. A repeated key replaces the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    /// Look up a field the bank document cannot do without.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            Error::malformed(format!(
                "region for sample '{}' is missing field '{}'",
                self.sample, key
            ))
        })
    }

    /// Resolve the recorded fields into a canonical region.
    pub fn to_region(&self) -> Result<Region> {
        let field = |key: &str| self.require(key).map(str::to_string);

        Ok(Region {
            sample_name: self.sample.clone(),
            key_min: field("Z_LowKey")?,
            key_max: field("Z_HighKey")?,
            original_key: field("Z_overridingRootKey")?,
            velocity_min: field("Z_LowVelocity")?,
            velocity_max: field("Z_HighVelocity")?,
            volume: REGION_VOLUME.to_string(),
            pan: field("Z_pan")?,
            envelope: Envelope {
                attack: field("Z_attackVolEnv")?,
                hold: field("Z_holdVolEnv")?,
                decay: field("Z_decayVolEnv")?,
                sustain: field("Z_sustainVolEnv")?,
                release: field("Z_releaseVolEnv")?,
            },
        })
    }
}

/// An instrument as read, before its regions are resolved.
#[derive(Debug)]
struct RawInstrument {
    name: String,
    program_number: String,
    regions: Vec<RegionFields>,
}

impl RawInstrument {
    fn into_instrument(self) -> Result<Instrument> {
        let regions = self
            .regions
            .iter()
            .map(RegionFields::to_region)
            .collect::<Result<Vec<_>>>()?;

        Ok(Instrument {
            name: self.name,
            program_number: self.program_number,
            note_count: None,
            regions,
        })
    }
}

/// Program number taken from the first run of digits in an instrument name.
///
/// The run is kept as decimal text without leading zeros, so it has no
/// upper bound: `Inst_007` gives `7` and `Inst_000` gives `0`.
pub(crate) fn program_number_from_name(name: &str) -> Option<String> {
    let digits = DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));
    digits.find(name).map(|m| {
        let trimmed = m.as_str().trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    })
}

fn parse_soundtool(content: &str) -> Result<Vec<Instrument>> {
    let mut instruments: Vec<RawInstrument> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match key {
            INSTRUMENT_KEY => {
                let program_number = program_number_from_name(value).ok_or_else(|| {
                    Error::malformed_at(
                        line_no,
                        format!("instrument name '{}' has no digits for a program number", value),
                    )
                })?;
                instruments.push(RawInstrument {
                    name: value.to_string(),
                    program_number,
                    regions: Vec::new(),
                });
            }
            SAMPLE_KEY => {
                let instrument = instruments.last_mut().ok_or_else(|| {
                    Error::malformed_at(line_no, "'Sample' line before any InstrumentName line")
                })?;
                instrument.regions.push(RegionFields::new(value));
            }
            _ => {
                let region = instruments
                    .last_mut()
                    .and_then(|instrument| instrument.regions.last_mut())
                    .ok_or_else(|| {
                        Error::malformed_at(line_no, format!("'{}' line before any Sample line", key))
                    })?;
                region.insert(key, value);
            }
        }
    }

    instruments
        .into_iter()
        .map(RawInstrument::into_instrument)
        .collect()
}
