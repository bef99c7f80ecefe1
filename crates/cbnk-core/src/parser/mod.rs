//! Dialect parsers for bank text dumps.
//!
//! Two upstream tools export the same instrument/sample information in
//! different line formats:
//!
//! - **Caesar**: `Instrument <name>` headers followed by `Key: Value` lines
//! - **SoundTool**: flat `Key=Value` lines, `InstrumentName=` and `Sample=`
//!   opening instruments and regions
//!
//! Each format is a [`Dialect`]. Both produce the same [`Instrument`] model,
//! so normalization and XML emission are shared.

use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Envelope, Instrument};

mod caesar;
mod soundtool;

pub use caesar::Caesar;
pub use soundtool::{RegionFields, SoundTool, REQUIRED_FIELDS};

/// One input grammar together with its emission policies.
pub trait Dialect {
    /// Which dialect this is.
    fn kind(&self) -> DialectKind;

    /// Parse the whole input into instruments in source order.
    fn parse(&self, content: &str) -> Result<Vec<Instrument>>;

    /// Whether a parsed instrument belongs in the bank document.
    fn is_eligible(&self, _instrument: &Instrument) -> bool {
        true
    }

    /// Instrument-level envelope for an instrument without regions.
    ///
    /// `None` omits the instrument `Envelope` element.
    fn fallback_envelope(&self) -> Option<Envelope> {
        None
    }

    /// Value written to `FilePath` for a region's sample.
    fn file_path(&self, sample_name: &str) -> String;
}

/// The known input dialects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialectKind {
    /// Dumps extracted with Caesar.
    Caesar,
    /// Dumps extracted with Wii3DSUSoundTool.
    SoundTool,
}

impl DialectKind {
    /// The parser/policy implementation for this dialect.
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Caesar => &Caesar,
            DialectKind::SoundTool => &SoundTool,
        }
    }

    /// Guess the dialect from the input text.
    ///
    /// Any `InstrumentName=` line marks a SoundTool dump; everything else is
    /// read as Caesar.
    pub fn detect(content: &str) -> Self {
        let is_soundtool = content
            .lines()
            .any(|line| line.trim().starts_with(soundtool::INSTRUMENT_KEY_PREFIX));
        if is_soundtool {
            DialectKind::SoundTool
        } else {
            DialectKind::Caesar
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DialectKind::Caesar => "Caesar",
            DialectKind::SoundTool => "SoundTool",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse bank text in the given dialect.
pub fn parse_bank_str(content: &str, kind: DialectKind) -> Result<Vec<Instrument>> {
    kind.dialect().parse(content)
}

/// Text after the first `: ` of a Caesar line, up to any following `: `.
pub(crate) fn colon_value(line: &str, line_no: usize) -> Result<&str> {
    line.split(": ").nth(1).ok_or_else(|| {
        Error::malformed_at(line_no, format!("expected 'Key: Value', found '{}'", line))
    })
}
