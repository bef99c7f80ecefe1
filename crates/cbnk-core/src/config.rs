//! Conversion settings.
//!
//! Every field has a default matching what the authoring pipeline expects,
//! so a config file only needs the values it changes:
//!
//! ```toml
//! title = "DrumBank"
//! output_suffix = ".cbnk"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const DEFAULT_NAMESPACE: &str = "NintendoWare.SoundFoundation.FileFormats.NintendoWare";

/// Settings for the bank document and output naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// `Head/Title` of the bank document
    pub title: String,
    /// `Version` attribute of the root element
    pub version: String,
    /// `Platform` attribute of the root element
    pub platform: String,
    /// Default `xmlns` of the root element
    pub namespace: String,
    /// Replaces the `.txt` extension of the input when deriving the output path
    pub output_suffix: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            title: "TestBank".to_string(),
            version: "1.0.0.0".to_string(),
            platform: "Ctr".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            output_suffix: "_output.cbnk".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
