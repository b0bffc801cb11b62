//! Impls for `bitcoin` types.

use bitcoin::hashes::Hash;
use bitcoin::{OutPoint, Transaction};

use crate::envelope::ControllerRef;
use crate::id::GlyphId;
use crate::tx::GlyphTx;

impl GlyphTx for Transaction {
    fn output_scripts(&self) -> impl Iterator<Item = &[u8]> {
        self.output.iter().map(|out| out.script_pubkey.as_bytes())
    }

    fn input_scripts(&self) -> impl Iterator<Item = Option<&[u8]>> {
        self.input.iter().map(|inp| {
            let script = inp.script_sig.as_bytes();
            (!script.is_empty()).then_some(script)
        })
    }
}

impl From<OutPoint> for GlyphId {
    fn from(op: OutPoint) -> Self {
        GlyphId::new(op.txid.to_string(), op.vout)
    }
}

impl From<OutPoint> for ControllerRef {
    fn from(op: OutPoint) -> Self {
        ControllerRef::new(op.txid.to_byte_array(), op.vout)
    }
}
