use bitcoin::{Script, Transaction, script::Instruction};
use glyph_fmt::{RevealEnvelope, TxLocation, decode_reveal_chunks};
use tracing::trace;

/// Extracts the data pushes of a script, in order.
///
/// Opcodes are skipped. `OP_FALSE` counts as an empty push. Returns `None`
/// if the script is malformed, such as a push running past the end.
pub fn extract_push_chunks(script: &Script) -> Option<Vec<&[u8]>> {
    let mut chunks = Vec::new();
    for inst in script.instructions() {
        match inst {
            Ok(Instruction::PushBytes(b)) => chunks.push(b.as_bytes()),
            Ok(Instruction::Op(_)) => {}
            Err(e) => {
                trace!(%e, "malformed script");
                return None;
            }
        }
    }
    Some(chunks)
}

/// Parses a reveal out of a script, keeping inline files.
pub fn parse_reveal_script(script: &Script) -> Option<RevealEnvelope> {
    let chunks = extract_push_chunks(script)?;
    decode_reveal_chunks(&chunks)
}

/// Finds the first reveal in a transaction.
///
/// Output scripts are scanned in order, then input unlocking scripts.
pub fn find_reveal(tx: &Transaction) -> Option<(TxLocation, RevealEnvelope)> {
    for (i, out) in tx.output.iter().enumerate() {
        if let Some(reveal) = parse_reveal_script(&out.script_pubkey) {
            trace!(vout = i, "glyph reveal in output");
            return Some((TxLocation::Output(i), reveal));
        }
    }

    for (i, inp) in tx.input.iter().enumerate() {
        if inp.script_sig.is_empty() {
            continue;
        }
        if let Some(reveal) = parse_reveal_script(&inp.script_sig) {
            trace!(vin = i, "glyph reveal in input");
            return Some((TxLocation::Input(i), reveal));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use bitcoin::{
        Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Witness, absolute,
        transaction::Version,
    };
    use glyph_fmt::{
        CommitRequest, Content, FileEntry, GlyphEnvelope, GlyphMetadata, ProtocolId,
        compute_commit_hash, encode_commit_envelope, encode_reveal_envelope,
        encode_reveal_envelope_b, parse_glyph_transaction, validate_metadata_value,
    };
    use serde_json::json;

    use super::*;
    use crate::builder::{build_commit_script, build_reveal_script};

    const FILE: &[u8] = b"{\"not\": \"metadata\"}";

    fn sample_meta() -> GlyphMetadata {
        GlyphMetadata::new("art", &[ProtocolId::Nft])
            .with_name("Moth")
            .with_content(Content::with_primary(FileEntry::for_bytes(
                "moth.json",
                "application/json",
                FILE,
            )))
    }

    fn tx_with(outputs: Vec<ScriptBuf>, inputs: Vec<ScriptBuf>) -> Transaction {
        Transaction {
            version: Version::TWO,
            lock_time: absolute::LockTime::ZERO,
            input: inputs
                .into_iter()
                .map(|script_sig| TxIn {
                    previous_output: OutPoint::null(),
                    script_sig,
                    sequence: Sequence::MAX,
                    witness: Witness::new(),
                })
                .collect(),
            output: outputs
                .into_iter()
                .map(|script_pubkey| TxOut {
                    value: Amount::ZERO,
                    script_pubkey,
                })
                .collect(),
        }
    }

    #[test]
    fn test_extract_push_chunks() {
        let script = build_reveal_script(&[&b"gly"[..], &b"{}"[..], &b""[..]]).unwrap();
        let chunks = extract_push_chunks(&script).unwrap();
        let expected: Vec<&[u8]> = vec![&b""[..], &b"gly"[..], &b"{}"[..], &b""[..]];
        assert_eq!(chunks, expected);

        // PUSHDATA1 claiming more bytes than follow.
        let truncated = ScriptBuf::from_bytes(vec![0x4c, 0x10, 0x01]);
        assert_eq!(extract_push_chunks(&truncated), None);
    }

    #[test]
    fn test_reveal_script_roundtrip() {
        let mut meta = sample_meta();
        let chunks = encode_reveal_envelope(&mut meta, &[FILE]).unwrap();
        let script = build_reveal_script(&chunks).unwrap();

        let reveal = parse_reveal_script(&script).unwrap();
        assert!(reveal.header.is_some());
        assert_eq!(reveal.files, vec![FILE.to_vec()]);
        assert_eq!(reveal.body.to_metadata().unwrap(), meta);
        assert_eq!(validate_metadata_value(reveal.metadata().unwrap()), Ok(()));
    }

    #[test]
    fn test_style_b_script_roundtrip() {
        let mut meta = sample_meta();
        let big = vec![0x5a; 3_000];
        let chunks = encode_reveal_envelope_b(&mut meta, &[FILE, big.as_slice()]).unwrap();
        let script = build_reveal_script(&chunks).unwrap();

        let reveal = parse_reveal_script(&script).unwrap();
        assert!(reveal.header.is_none());
        assert_eq!(reveal.files, vec![FILE.to_vec(), big]);
        assert_eq!(reveal.metadata().unwrap()["name"], json!("Moth"));
    }

    #[test]
    fn test_find_reveal() {
        let mut meta = sample_meta();
        let reveal_script = build_reveal_script(&encode_reveal_envelope(&mut meta, &[]).unwrap())
            .unwrap();

        let hash = compute_commit_hash(&mut meta).unwrap();
        let commit = encode_commit_envelope(&CommitRequest::new(&hash)).unwrap();
        let commit_script = build_commit_script(&commit).unwrap();

        // Commit in the outputs, reveal in the second input.
        let tx = tx_with(
            vec![commit_script.clone(), ScriptBuf::new()],
            vec![ScriptBuf::new(), reveal_script.clone()],
        );
        let (location, reveal) = find_reveal(&tx).unwrap();
        assert_eq!(location, TxLocation::Input(1));
        assert_eq!(reveal.metadata().unwrap()["name"], json!("Moth"));

        // The flat scan finds the commit first and places it at output 0.
        let parsed = parse_glyph_transaction(&tx).unwrap();
        assert_eq!(parsed.location, TxLocation::Output(0));
        let GlyphEnvelope::Commit(env) = parsed.envelope else {
            panic!("expected commit");
        };
        assert_eq!(env.commit_hash, hash);

        // Reveal in an output wins over one in an input.
        let tx = tx_with(
            vec![ScriptBuf::new(), reveal_script.clone()],
            vec![reveal_script],
        );
        let (location, _) = find_reveal(&tx).unwrap();
        assert_eq!(location, TxLocation::Output(1));

        assert!(find_reveal(&tx_with(vec![commit_script], vec![])).is_none());
    }
}
