//! Instrument bank conversion for the NintendoWare sound authoring pipeline.
//!
//! This crate turns the text dumps produced by two bank extraction tools
//! into a `.cbnk` XML bank document:
//! - Caesar and SoundTool dump parsing
//! - Per-dialect eligibility and envelope defaulting
//! - Bank element tree construction
//! - Deterministic, indented XML output
//!
//! # Architecture
//!
//! ```text
//! text ──parser──▶ Vec<Instrument> ──normalize──▶ Bank ──builder──▶ Element ──xml──▶ String
//! ```
//!
//! The two dialects share the model, builder and serializer; they differ
//! only in what the [`Dialect`] trait lets them decide.
//!
//! # Example
//!
//! ```
//! use cbnk_core::{convert_str, ConvertConfig, DialectKind};
//!
//! let dump = "Instrument 3\nNote Count: 1\nSample: kick\nStart Note: 0\nEnd Note: 60\n";
//! let xml = convert_str(dump, DialectKind::Caesar, &ConvertConfig::default())?;
//! assert!(xml.contains("<FilePath>kick.wav</FilePath>"));
//! # Ok::<(), cbnk_core::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod types;
pub mod xml;

pub use builder::BankBuilder;
pub use config::ConvertConfig;
pub use convert::{build_bank_document, convert_file, convert_str, load_bank_str};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use parser::{parse_bank_str, Caesar, Dialect, DialectKind, SoundTool};
pub use types::*;
pub use xml::{to_xml_string, Element};
