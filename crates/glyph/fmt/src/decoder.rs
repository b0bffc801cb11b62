//! Recovering envelopes from untrusted buffers.
//!
//! Decoding is two-phase: a cheap scan for the magic bytes, then a strict
//! parse anchored right after the first match. The magic can occur by chance
//! inside unrelated script bytes; such false positives fail the strict reads
//! and are reported as "no envelope". Nothing here returns an error or
//! panics on bad input: `None` means the buffer holds no recognizable
//! envelope and is not something to log or retry.

use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::constants::{
    GLYPH_MAGIC, HEADER_LEN, MAX_METADATA_SIZE, MAX_REVEAL_ENVELOPE_B_SIZE, flags,
    is_known_version,
};
use crate::envelope::{
    CommitEnvelope, ControllerRef, GlyphEnvelope, RevealBody, RevealEnvelope, RevealHeader,
};
use crate::magic::MAGIC_BYTES_LEN;
use crate::reader::{EnvelopeReader, ReadError};

/// Why a buffer was not recognized. Only surfaced through tracing.
#[derive(Debug, Error)]
enum Rejection {
    #[error("no magic bytes")]
    NoMagic,

    #[error("input of {0} bytes over limit")]
    Oversized(usize),

    #[error("unknown version {0}")]
    UnknownVersion(u8),

    #[error("truncated: {0}")]
    Truncated(#[from] ReadError),
}

/// Returns if `buf` contains the glyph magic anywhere.
///
/// This is only a prefilter; use [`decode_envelope`] to check structure.
pub fn contains_magic(buf: &[u8]) -> bool {
    GLYPH_MAGIC.find_in(buf).is_some()
}

/// Decodes the envelope starting at the first magic in `script`.
///
/// Returns `None` if there is no magic, the version is unknown, or the
/// fields after the magic are truncated.
pub fn decode_envelope(script: &[u8]) -> Option<GlyphEnvelope> {
    match try_decode_envelope(script) {
        Ok(env) => Some(env),
        Err(reason) => {
            trace!(%reason, len = script.len(), "no glyph envelope");
            None
        }
    }
}

fn try_decode_envelope(script: &[u8]) -> Result<GlyphEnvelope, Rejection> {
    if script.len() > MAX_REVEAL_ENVELOPE_B_SIZE {
        return Err(Rejection::Oversized(script.len()));
    }

    let at = GLYPH_MAGIC.find_in(script).ok_or(Rejection::NoMagic)?;
    let mut reader = EnvelopeReader::new(&script[at + MAGIC_BYTES_LEN..]);

    let version = reader.read_u8()?;
    if !is_known_version(version) {
        return Err(Rejection::UnknownVersion(version));
    }
    let fl = reader.read_u8()?;

    if fl & flags::IS_REVEAL != 0 {
        Ok(GlyphEnvelope::Reveal(decode_reveal_envelope(
            &mut reader,
            version,
            fl,
        )))
    } else {
        Ok(GlyphEnvelope::Commit(decode_commit_envelope(
            &mut reader,
            version,
            fl,
        )?))
    }
}

/// Reads the commit fields following a header, in encoder order.
///
/// Bytes after the last flagged field are ignored.
pub fn decode_commit_envelope(
    reader: &mut EnvelopeReader<'_>,
    version: u8,
    fl: u8,
) -> Result<CommitEnvelope, ReadError> {
    let commit_hash = reader.read_arr::<32>()?;

    let content_root = if fl & flags::HAS_CONTENT_ROOT != 0 {
        Some(reader.read_arr::<32>()?)
    } else {
        None
    };

    let controller = if fl & flags::HAS_CONTROLLER != 0 {
        Some(ControllerRef::from_bytes(reader.read_arr::<36>()?))
    } else {
        None
    };

    Ok(CommitEnvelope {
        version,
        flags: fl,
        commit_hash,
        content_root,
        controller,
    })
}

/// Reads the reveal body following a header.
///
/// Everything left is taken as the metadata body. A body that is not JSON
/// is kept raw; the envelope is still a reveal.
pub fn decode_reveal_envelope(
    reader: &mut EnvelopeReader<'_>,
    version: u8,
    fl: u8,
) -> RevealEnvelope {
    RevealEnvelope {
        header: Some(RevealHeader { version, flags: fl }),
        body: parse_body(reader.read_rest()),
        files: Vec::new(),
    }
}

fn parse_body(body: &[u8]) -> RevealBody {
    match serde_json::from_slice::<Value>(body) {
        Ok(v) => RevealBody::Metadata(v),
        Err(e) => {
            trace!(%e, len = body.len(), "reveal body is not json, keeping raw bytes");
            RevealBody::Raw(body.to_vec())
        }
    }
}

/// How a reveal opens.
enum Opening {
    /// Style A header chunk.
    Header(RevealHeader),

    /// Style B bare magic chunk.
    Bare,
}

fn classify_opening(chunk: &[u8]) -> Option<Opening> {
    if chunk == GLYPH_MAGIC.as_bytes() {
        return Some(Opening::Bare);
    }

    if chunk.len() == HEADER_LEN && GLYPH_MAGIC.is_prefix_of(chunk) {
        let version = chunk[MAGIC_BYTES_LEN];
        let fl = chunk[MAGIC_BYTES_LEN + 1];
        if is_known_version(version) && fl & flags::IS_REVEAL != 0 {
            return Some(Opening::Header(RevealHeader { version, flags: fl }));
        }
    }

    None
}

/// Decodes a reveal from a chunk list whose boundaries are known, such as
/// the pushes of a script.
///
/// The first chunk that is a style A header or a bare style B magic opens
/// the reveal; the chunk after it is the metadata and every later chunk is
/// an inline file. Chunk sets over the style B envelope limit are rejected
/// before anything is copied, as are style A metadata chunks over the
/// metadata limit. Style B metadata is only bounded by the overall limit.
pub fn decode_reveal_chunks<C: AsRef<[u8]>>(chunks: &[C]) -> Option<RevealEnvelope> {
    let total = chunks
        .iter()
        .fold(0usize, |acc, c| acc.saturating_add(c.as_ref().len()));
    if total > MAX_REVEAL_ENVELOPE_B_SIZE {
        trace!(total, "reveal chunks over limit");
        return None;
    }

    let (pos, opening) = chunks
        .iter()
        .enumerate()
        .find_map(|(i, c)| classify_opening(c.as_ref()).map(|o| (i, o)))?;

    let meta: &[u8] = match chunks.get(pos + 1) {
        Some(c) => c.as_ref(),
        None => {
            trace!(pos, "reveal opening without metadata chunk");
            return None;
        }
    };
    let header = match opening {
        Opening::Header(h) => {
            if meta.len() > MAX_METADATA_SIZE {
                trace!(len = meta.len(), "reveal metadata chunk over limit");
                return None;
            }
            Some(h)
        }
        Opening::Bare => None,
    };

    Some(RevealEnvelope {
        header,
        body: parse_body(meta),
        files: chunks[pos + 2..]
            .iter()
            .map(|c| c.as_ref().to_vec())
            .collect(),
    })
}
