use std::io;
use thiserror::Error;

/// Result type alias for bank conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a bank dump
///
/// Every variant is fatal for the run: a conversion either produces the
/// whole document or nothing at all.
///
/// - Grammar errors: the text does not follow the dialect's line format
/// - Model errors: a region lacks a field the bank document requires
/// - I/O and config errors: the input, output or config file is unusable
#[derive(Error, Debug)]
pub enum Error {
    /// Input/Output error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Structural violation of the dialect grammar
    ///
    /// Common causes:
    /// - A sample field appears before any `Sample` line opened a region
    /// - An instrument name carries no digits to derive a program number from
    /// - A SoundTool region is missing one of the `Z_*` fields
    #[error("{}", malformed_message(.line, .message))]
    MalformedInput {
        /// Line number where the problem was found (1-based), if known
        line: Option<usize>,
        /// Description of the problem
        message: String,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// XML writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Serialized document was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Malformed input at a known line.
    pub fn malformed_at(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedInput {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Malformed input detected after parsing, with no line to point at.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput {
            line: None,
            message: message.into(),
        }
    }

    /// Returns true for grammar/model violations of the input text.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedInput { .. })
    }
}

fn malformed_message(line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("Malformed input at line {}: {}", line, message),
        None => format!("Malformed input: {}", message),
    }
}
