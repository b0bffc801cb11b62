//! Scanning transactions for envelopes.

use tracing::trace;

use crate::decoder::{contains_magic, decode_envelope};
use crate::envelope::GlyphEnvelope;

/// Script access needed to scan a transaction.
///
/// Implemented for [`RawTx`] and, with the `bitcoin` feature, for
/// `bitcoin::Transaction`.
pub trait GlyphTx {
    /// Output locking scripts, in output order.
    fn output_scripts(&self) -> impl Iterator<Item = &[u8]>;

    /// Input unlocking scripts, in input order. `None` for an input without
    /// one.
    fn input_scripts(&self) -> impl Iterator<Item = Option<&[u8]>>;
}

/// Transaction reduced to its raw scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTx {
    /// Output locking scripts.
    pub outputs: Vec<Vec<u8>>,

    /// Input unlocking scripts.
    pub inputs: Vec<Option<Vec<u8>>>,
}

impl GlyphTx for RawTx {
    fn output_scripts(&self) -> impl Iterator<Item = &[u8]> {
        self.outputs.iter().map(Vec::as_slice)
    }

    fn input_scripts(&self) -> impl Iterator<Item = Option<&[u8]>> {
        self.inputs.iter().map(Option::as_deref)
    }
}

/// Where in a transaction an envelope was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxLocation {
    /// Output at this index.
    Output(usize),

    /// Input at this index.
    Input(usize),
}

/// Envelope found in a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGlyphTx {
    /// Where it was found.
    pub location: TxLocation,

    /// The envelope.
    pub envelope: GlyphEnvelope,
}

impl ParsedGlyphTx {
    /// Returns if the envelope is a reveal.
    pub fn is_reveal(&self) -> bool {
        self.envelope.is_reveal()
    }

    /// Returns the output index, if found in an output.
    pub fn output_index(&self) -> Option<usize> {
        match self.location {
            TxLocation::Output(i) => Some(i),
            TxLocation::Input(_) => None,
        }
    }
}

/// Returns if any output script or input unlocking script contains the
/// glyph magic.
pub fn is_glyph_transaction<T: GlyphTx>(tx: &T) -> bool {
    tx.output_scripts().any(contains_magic) || tx.input_scripts().flatten().any(contains_magic)
}

/// Finds the first envelope in a transaction.
///
/// Outputs are scanned in order and the first one holding any envelope wins.
/// Failing that, inputs are scanned in order for the first reveal; commits
/// are never expected in unlocking scripts. Later envelopes in the same
/// transaction are not looked at.
pub fn parse_glyph_transaction<T: GlyphTx>(tx: &T) -> Option<ParsedGlyphTx> {
    for (i, script) in tx.output_scripts().enumerate() {
        if let Some(envelope) = decode_envelope(script) {
            trace!(vout = i, reveal = envelope.is_reveal(), "glyph envelope in output");
            return Some(ParsedGlyphTx {
                location: TxLocation::Output(i),
                envelope,
            });
        }
    }

    for (i, script) in tx.input_scripts().enumerate() {
        let Some(script) = script else {
            continue;
        };

        if let Some(envelope @ GlyphEnvelope::Reveal(_)) = decode_envelope(script) {
            trace!(vin = i, "glyph reveal in input");
            return Some(ParsedGlyphTx {
                location: TxLocation::Input(i),
                envelope,
            });
        }
    }

    None
}
