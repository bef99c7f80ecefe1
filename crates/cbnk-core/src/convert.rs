//! Text-to-document pipeline.

use std::fs;
use std::path::Path;

use crate::builder::BankBuilder;
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::normalize::normalize;
use crate::parser::{parse_bank_str, DialectKind};
use crate::types::Bank;
use crate::xml::{to_xml_string, Element};

/// Parse and normalize bank text.
pub fn load_bank_str(content: &str, dialect: DialectKind) -> Result<Bank> {
    let instruments = parse_bank_str(content, dialect)?;
    log::debug!("Parsed {} {} instruments", instruments.len(), dialect);
    Ok(normalize(dialect, instruments))
}

/// Build the element tree for bank text.
pub fn build_bank_document(
    content: &str,
    dialect: DialectKind,
    config: &ConvertConfig,
) -> Result<Element> {
    let bank = load_bank_str(content, dialect)?;
    log::info!("{}", bank.info());
    Ok(BankBuilder::new(config).build(&bank))
}

/// Convert bank text into the XML bank document.
///
/// Nothing is returned unless the whole input converts.
pub fn convert_str(content: &str, dialect: DialectKind, config: &ConvertConfig) -> Result<String> {
    let document = build_bank_document(content, dialect, config)?;
    to_xml_string(&document)
}

/// Convert one bank file into one XML file.
///
/// The document is fully rendered before `output` is opened, so a failed
/// conversion leaves no output file behind.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    dialect: Option<DialectKind>,
    config: &ConvertConfig,
) -> Result<DialectKind> {
    let content = fs::read_to_string(input.as_ref())?;
    let dialect = dialect.unwrap_or_else(|| {
        let detected = DialectKind::detect(&content);
        log::info!("Detected {} dialect", detected);
        detected
    });

    let xml = convert_str(&content, dialect, config)?;
    fs::write(output.as_ref(), xml)?;
    Ok(dialect)
}
