//! Caesar dump parser.
//!
//! ```text
//! Instrument 3
//! Program Number: 3
//! Note Count: 1
//! Sample: kick
//! Start Note: 0
//! End Note: 60
//! Base Note: 36
//! Attack: 10
//! ```
//!
//! An `Instrument` line starts a new instrument, a `Sample:` line starts a
//! new region of the current instrument. Every other known key fills a
//! field of whichever of the two is currently open.

use crate::error::{Error, Result};
use crate::parser::{colon_value, Dialect, DialectKind};
use crate::types::{Instrument, Region, CORRUPT_NOTE_COUNT, MAX_NOTE_COUNT};

/// First token of a line that opens an instrument.
const INSTRUMENT_SENTINEL: &str = "Instrument";

/// Caesar dialect.
#[derive(Clone, Copy, Debug, Default)]
pub struct Caesar;

impl Dialect for Caesar {
    fn kind(&self) -> DialectKind {
        DialectKind::Caesar
    }

    fn parse(&self, content: &str) -> Result<Vec<Instrument>> {
        parse_caesar(content)
    }

    fn is_eligible(&self, instrument: &Instrument) -> bool {
        !matches!(instrument.note_count, Some(0) | Some(CORRUPT_NOTE_COUNT))
    }

    fn file_path(&self, sample_name: &str) -> String {
        format!("{}.wav", sample_name)
    }
}

/// Instrument and region being accumulated while walking the lines.
#[derive(Default)]
struct CaesarBuilder {
    instruments: Vec<Instrument>,
    instrument: Option<Instrument>,
    region: Option<Region>,
}

impl CaesarBuilder {
    fn open_instrument(&mut self, name: &str) {
        self.flush_instrument();
        self.instrument = Some(Instrument {
            name: format!("{}{}", INSTRUMENT_SENTINEL, name),
            program_number: String::new(),
            note_count: Some(0),
            regions: Vec::new(),
        });
    }

    fn open_region(&mut self, line_no: usize, sample: &str) -> Result<()> {
        if self.instrument.is_none() {
            return Err(Error::malformed_at(
                line_no,
                "'Sample' line before any Instrument line",
            ));
        }
        self.flush_region();
        self.region = Some(Region {
            sample_name: sample.to_string(),
            velocity_min: "0".to_string(),
            velocity_max: "127".to_string(),
            ..Default::default()
        });
        Ok(())
    }

    fn flush_region(&mut self) {
        if let (Some(region), Some(instrument)) = (self.region.take(), self.instrument.as_mut()) {
            instrument.regions.push(region);
        }
    }

    fn flush_instrument(&mut self) {
        self.flush_region();
        if let Some(instrument) = self.instrument.take() {
            self.instruments.push(instrument);
        }
    }

    fn instrument_mut(&mut self, line_no: usize, key: &str) -> Result<&mut Instrument> {
        self.instrument.as_mut().ok_or_else(|| {
            Error::malformed_at(line_no, format!("'{}' line before any Instrument line", key))
        })
    }

    fn region_mut(&mut self, line_no: usize, key: &str) -> Result<&mut Region> {
        self.region.as_mut().ok_or_else(|| {
            Error::malformed_at(line_no, format!("'{}' line before any Sample line", key))
        })
    }

    fn set_note_count(&mut self, line_no: usize, value: &str) -> Result<()> {
        let instrument = self.instrument_mut(line_no, "Note Count")?;
        match value.trim().parse::<i64>() {
            // The corrupt marker always wins over the range check below.
            Ok(CORRUPT_NOTE_COUNT) => instrument.note_count = Some(CORRUPT_NOTE_COUNT),
            Ok(count) if (0..=MAX_NOTE_COUNT).contains(&count) => {
                instrument.note_count = Some(count)
            }
            Ok(count) => {
                log::debug!("Ignoring out-of-range note count {} at line {}", count, line_no)
            }
            Err(_) => {
                log::debug!("Ignoring non-numeric note count '{}' at line {}", value, line_no)
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<Instrument> {
        self.flush_instrument();
        self.instruments
    }
}

fn parse_caesar(content: &str) -> Result<Vec<Instrument>> {
    let mut builder = CaesarBuilder::default();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with(INSTRUMENT_SENTINEL) {
            let name = line.split(' ').nth(1).ok_or_else(|| {
                Error::malformed_at(line_no, format!("instrument line without a name: '{}'", line))
            })?;
            builder.open_instrument(name);
            continue;
        }

        let Some((key, _)) = line.split_once(':') else {
            continue;
        };

        match key {
            "Program Number" => {
                let value = colon_value(line, line_no)?;
                builder.instrument_mut(line_no, key)?.program_number = value.to_string();
            }
            "Note Count" => {
                let value = colon_value(line, line_no)?;
                builder.set_note_count(line_no, value)?;
            }
            "Sample" => {
                let value = colon_value(line, line_no)?;
                builder.open_region(line_no, value)?;
            }
            "Start Note" | "End Note" | "Base Note" | "Volume" | "Pan" | "Attack" | "Hold"
            | "Decay" | "Sustain" | "Release" => {
                let value = colon_value(line, line_no)?.to_string();
                let region = builder.region_mut(line_no, key)?;
                let field = match key {
                    "Start Note" => &mut region.key_min,
                    "End Note" => &mut region.key_max,
                    "Base Note" => &mut region.original_key,
                    "Volume" => &mut region.volume,
                    "Pan" => &mut region.pan,
                    "Attack" => &mut region.envelope.attack,
                    "Hold" => &mut region.envelope.hold,
                    "Decay" => &mut region.envelope.decay,
                    "Sustain" => &mut region.envelope.sustain,
                    _ => &mut region.envelope.release,
                };
                *field = value;
            }
            _ => {}
        }
    }

    Ok(builder.finish())
}
