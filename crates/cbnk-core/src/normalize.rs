//! Eligibility and default-envelope rules applied between parsing and emission.

use crate::parser::{Dialect, DialectKind};
use crate::types::{Bank, BankInstrument, Instrument};

/// Turn parsed instruments into an emission-ready bank.
///
/// Instruments the dialect rejects are dropped. Every kept instrument gets
/// the envelope of its first region as its default, or the dialect's
/// fallback when it has no regions.
pub fn normalize(kind: DialectKind, instruments: Vec<Instrument>) -> Bank {
    let dialect = kind.dialect();
    let total = instruments.len();

    let instruments: Vec<BankInstrument> = instruments
        .into_iter()
        .filter(|instrument| {
            let eligible = dialect.is_eligible(instrument);
            if !eligible {
                log::debug!(
                    "Skipping instrument '{}' (note count {:?})",
                    instrument.name,
                    instrument.note_count
                );
            }
            eligible
        })
        .map(|instrument| resolve_envelope(dialect, instrument))
        .collect();

    if instruments.len() < total {
        log::info!(
            "Dropped {} of {} instruments with invalid note counts",
            total - instruments.len(),
            total
        );
    }

    Bank {
        dialect: kind,
        instruments,
    }
}

fn resolve_envelope(dialect: &dyn Dialect, instrument: Instrument) -> BankInstrument {
    let envelope = match instrument.first_region_envelope() {
        Some(envelope) => Some(envelope.clone()),
        None => {
            log::warn!("Instrument '{}' has no regions", instrument.name);
            dialect.fallback_envelope()
        }
    };

    BankInstrument {
        instrument,
        envelope,
    }
}
