//! Bank document builder.
//!
//! Maps a normalized [`Bank`] onto the NintendoWare bank element tree:
//!
//! ```text
//! Bank
//! ├── Head/Title
//! └── Body/Bank/Items
//!     └── Instrument (one per instrument)
//!         ├── Parameters
//!         └── Items (one per region)
//!             └── KeyRegion
//!                 ├── Parameters
//!                 └── Items/VelocityRegion/Parameters
//! ```
//!
//! Many fields are fixed values the authoring tool expects on every block;
//! only keys, velocities, sample paths, pan, volume and envelopes come from
//! the input.

use crate::config::{ConvertConfig, XSD_NAMESPACE, XSI_NAMESPACE};
use crate::parser::Dialect;
use crate::types::{Bank, BankInstrument, Envelope, Region};
use crate::xml::Element;

/// Number of empty `CommentN` placeholders on every `Parameters` block.
const COMMENT_SLOTS: usize = 10;

/// Builds the element tree for a bank.
pub struct BankBuilder<'a> {
    config: &'a ConvertConfig,
}

impl<'a> BankBuilder<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self { config }
    }

    /// Build the whole document.
    pub fn build(&self, bank: &Bank) -> Element {
        let dialect = bank.dialect.dialect();

        let mut root = Element::new("Bank")
            .attr("xmlns:xsi", XSI_NAMESPACE)
            .attr("xmlns:xsd", XSD_NAMESPACE)
            .attr("xmlns", self.config.namespace.as_str())
            .attr("Version", self.config.version.as_str())
            .attr("Platform", self.config.platform.as_str());

        root.push(Element::new("Head"))
            .push_text("Title", self.config.title.as_str());

        let items = root
            .push(Element::new("Body"))
            .push(Element::new("Bank"))
            .push(Element::new("Items"));

        for instrument in &bank.instruments {
            items.push(build_instrument(dialect, instrument));
        }

        root
    }
}

fn build_instrument(dialect: &dyn Dialect, bank_instrument: &BankInstrument) -> Element {
    let instrument = &bank_instrument.instrument;
    let mut element = Element::new("Instrument").attr("Name", instrument.name.as_str());

    let params = element.push(common_parameters());
    params.push_text("ProgramNo", instrument.program_number.as_str());
    params.push_text("Volume", "127");
    params.push_text("PitchSemitones", "0");
    params.push_text("PitchCents", "0");
    if let Some(envelope) = &bank_instrument.envelope {
        params.push(envelope_element(envelope));
    }
    params.push_text("InstrumentEnvelopeMode", "Instrument");

    for region in &instrument.regions {
        element
            .push(Element::new("Items"))
            .push(key_region(dialect, region));
    }

    element
}

fn key_region(dialect: &dyn Dialect, region: &Region) -> Element {
    let mut key_region = Element::new("KeyRegion");

    let params = key_region.push(common_parameters());
    params.push_text("KeyMin", region.key_min.as_str());
    params.push_text("KeyMax", region.key_max.as_str());

    key_region
        .push(Element::new("Items"))
        .push(velocity_region(dialect, region));

    key_region
}

fn velocity_region(dialect: &dyn Dialect, region: &Region) -> Element {
    let mut velocity_region = Element::new("VelocityRegion");

    let params = velocity_region.push(common_parameters());
    params.push_text("FilePath", dialect.file_path(&region.sample_name));
    params.push_text("WaveEncoding", "Adpcm");
    params.push_text("OriginalKey", region.original_key.as_str());
    params.push(envelope_element(&region.envelope));
    params.push_text("VelocityMin", region.velocity_min.as_str());
    params.push_text("VelocityMax", region.velocity_max.as_str());
    params.push_text("Volume", region.volume.as_str());
    params.push_text("Pan", region.pan.as_str());
    params.push_text("PitchSemitones", "0");
    params.push_text("PitchCents", "0");
    params.push_text("KeyGroup", "0");
    params.push_text("InterpolationType", "Polyphase");
    params.push_text("InstrumentNoteOffMode", "Release");

    velocity_region
}

/// `Parameters` block pre-filled with the fields every level shares.
fn common_parameters() -> Element {
    let mut params = Element::new("Parameters");
    for slot in 0..COMMENT_SLOTS {
        params.push(Element::new(format!("Comment{}", slot)));
    }
    params.push_text("ColorIndex", "0");
    params.push_text("IsEnabled", "True");
    params
}

fn envelope_element(envelope: &Envelope) -> Element {
    let mut element = Element::new("Envelope");
    let params = element.push(Element::new("Parameters"));
    params.push_text("Attack", envelope.attack.as_str());
    params.push_text("Decay", envelope.decay.as_str());
    params.push_text("Sustain", envelope.sustain.as_str());
    params.push_text("Hold", envelope.hold.as_str());
    params.push_text("Release", envelope.release.as_str());
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DialectKind;
    use crate::types::Instrument;

    fn region(sample: &str) -> Region {
        Region {
            sample_name: sample.to_string(),
            key_min: "0".to_string(),
            key_max: "60".to_string(),
            original_key: "36".to_string(),
            velocity_min: "0".to_string(),
            velocity_max: "127".to_string(),
            volume: "100".to_string(),
            pan: "64".to_string(),
            envelope: Envelope {
                attack: "10".to_string(),
                hold: "0".to_string(),
                decay: "20".to_string(),
                sustain: "80".to_string(),
                release: "30".to_string(),
            },
        }
    }

    fn bank(dialect: DialectKind, regions: Vec<Region>, envelope: Option<Envelope>) -> Bank {
        Bank {
            dialect,
            instruments: vec![BankInstrument {
                instrument: Instrument {
                    name: "Instrument3".to_string(),
                    program_number: "3".to_string(),
                    note_count: Some(1),
                    regions,
                },
                envelope,
            }],
        }
    }

    #[test]
    fn test_root_attributes_and_head() {
        let config = ConvertConfig::default();
        let root = BankBuilder::new(&config).build(&bank(DialectKind::Caesar, vec![], None));

        let keys: Vec<_> = root.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["xmlns:xsi", "xmlns:xsd", "xmlns", "Version", "Platform"]);
        assert_eq!(root.get_attr("Platform"), Some("Ctr"));
        assert_eq!(root.text_at("Head/Title"), Some("TestBank"));
    }

    #[test]
    fn test_instrument_parameters() {
        let config = ConvertConfig::default();
        let env = region("kick").envelope;
        let root = BankBuilder::new(&config).build(&bank(
            DialectKind::Caesar,
            vec![region("kick")],
            Some(env),
        ));

        let instrument = root.find("Body/Bank/Items/Instrument").unwrap();
        assert_eq!(instrument.get_attr("Name"), Some("Instrument3"));

        let params = instrument.child("Parameters").unwrap();
        let names: Vec<_> = params.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Comment0", "Comment1", "Comment2", "Comment3", "Comment4", "Comment5",
                "Comment6", "Comment7", "Comment8", "Comment9", "ColorIndex", "IsEnabled",
                "ProgramNo", "Volume", "PitchSemitones", "PitchCents", "Envelope",
                "InstrumentEnvelopeMode",
            ]
        );
        assert_eq!(params.text_at("ProgramNo"), Some("3"));
        assert_eq!(params.text_at("Envelope/Parameters/Release"), Some("30"));
    }

    #[test]
    fn test_missing_envelope_is_omitted() {
        let config = ConvertConfig::default();
        let root = BankBuilder::new(&config).build(&bank(DialectKind::Caesar, vec![], None));
        let params = root.find("Body/Bank/Items/Instrument/Parameters").unwrap();
        assert!(params.child("Envelope").is_none());
        assert_eq!(params.text_at("InstrumentEnvelopeMode"), Some("Instrument"));
    }

    #[test]
    fn test_velocity_region_fields() {
        let config = ConvertConfig::default();
        let root = BankBuilder::new(&config).build(&bank(DialectKind::Caesar, vec![region("kick")], None));

        let key_region = root
            .find("Body/Bank/Items/Instrument/Items/KeyRegion")
            .unwrap();
        assert_eq!(key_region.text_at("Parameters/KeyMin"), Some("0"));
        assert_eq!(key_region.text_at("Parameters/KeyMax"), Some("60"));

        let params = key_region.find("Items/VelocityRegion/Parameters").unwrap();
        assert_eq!(params.text_at("FilePath"), Some("kick.wav"));
        assert_eq!(params.text_at("WaveEncoding"), Some("Adpcm"));
        assert_eq!(params.text_at("OriginalKey"), Some("36"));
        assert_eq!(params.text_at("VelocityMin"), Some("0"));
        assert_eq!(params.text_at("VelocityMax"), Some("127"));
        assert_eq!(params.text_at("Volume"), Some("100"));
        assert_eq!(params.text_at("Pan"), Some("64"));
        assert_eq!(params.text_at("KeyGroup"), Some("0"));
        assert_eq!(params.text_at("InterpolationType"), Some("Polyphase"));
        assert_eq!(params.text_at("InstrumentNoteOffMode"), Some("Release"));
        assert_eq!(params.text_at("Envelope/Parameters/Attack"), Some("10"));
    }

    #[test]
    fn test_soundtool_file_path_is_verbatim() {
        let config = ConvertConfig::default();
        let root = BankBuilder::new(&config).build(&bank(
            DialectKind::SoundTool,
            vec![region("kick.wav")],
            None,
        ));
        let path = root
            .text_at("Body/Bank/Items/Instrument/Items/KeyRegion/Items/VelocityRegion/Parameters/FilePath");
        assert_eq!(path, Some("kick.wav"));
    }

    #[test]
    fn test_one_items_block_per_region() {
        let config = ConvertConfig::default();
        let root = BankBuilder::new(&config).build(&bank(
            DialectKind::Caesar,
            vec![region("a"), region("b"), region("c")],
            None,
        ));
        let instrument = root.find("Body/Bank/Items/Instrument").unwrap();
        let paths: Vec<_> = instrument
            .children_named("Items")
            .map(|items| {
                items
                    .text_at("KeyRegion/Items/VelocityRegion/Parameters/FilePath")
                    .unwrap()
            })
            .collect();
        assert_eq!(paths, ["a.wav", "b.wav", "c.wav"]);
    }
}
