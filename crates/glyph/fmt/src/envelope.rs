//! Decoded envelope types.

use std::fmt;

use serde_json::Value;

use crate::constants::{CONTROLLER_LEN, flags};
use crate::hasher::Hash32;
use crate::metadata::GlyphMetadata;

/// Outpoint-sized reference to the output controlling a token: the 32-byte
/// txid followed by the little-endian vout.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerRef([u8; CONTROLLER_LEN]);

impl ControllerRef {
    /// Constructs a reference from a txid (internal byte order) and vout.
    pub fn new(txid: [u8; 32], vout: u32) -> Self {
        let mut buf = [0; CONTROLLER_LEN];
        buf[..32].copy_from_slice(&txid);
        buf[32..].copy_from_slice(&vout.to_le_bytes());
        Self(buf)
    }

    /// Wraps the raw 36 bytes.
    pub const fn from_bytes(bytes: [u8; CONTROLLER_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 36 bytes.
    pub const fn as_bytes(&self) -> &[u8; CONTROLLER_LEN] {
        &self.0
    }

    /// Gets the txid, in internal byte order.
    pub fn txid(&self) -> [u8; 32] {
        let mut txid = [0; 32];
        txid.copy_from_slice(&self.0[..32]);
        txid
    }

    /// Gets the vout.
    pub fn vout(&self) -> u32 {
        let mut vout = [0; 4];
        vout.copy_from_slice(&self.0[32..]);
        u32::from_le_bytes(vout)
    }
}

impl fmt::Debug for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControllerRef({}:{})", hex::encode(self.txid()), self.vout())
    }
}

/// Commitment to metadata that will be revealed later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEnvelope {
    /// Envelope version tag.
    pub version: u8,

    /// Flag bits, as found on the wire.
    pub flags: u8,

    /// Hash of the canonical metadata bytes.
    pub commit_hash: Hash32,

    /// Root over the content files, present iff flagged.
    pub content_root: Option<Hash32>,

    /// Controlling outpoint, present iff flagged.
    pub controller: Option<ControllerRef>,
}

impl CommitEnvelope {
    /// Returns if the profile hint bit is set.
    pub fn has_profile_hint(&self) -> bool {
        self.flags & flags::HAS_PROFILE_HINT != 0
    }
}

/// Version and flags of a style A reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealHeader {
    /// Envelope version tag.
    pub version: u8,

    /// Flag bits, with [`flags::IS_REVEAL`] set.
    pub flags: u8,
}

/// Body of a reveal.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealBody {
    /// The body parsed as JSON.
    Metadata(Value),

    /// The body did not parse; the bytes are kept as found.
    Raw(Vec<u8>),
}

impl RevealBody {
    /// Returns the parsed value, if the body parsed.
    pub fn value(&self) -> Option<&Value> {
        match self {
            RevealBody::Metadata(v) => Some(v),
            RevealBody::Raw(_) => None,
        }
    }

    /// Reads the parsed value as a [`GlyphMetadata`] record, if possible.
    pub fn to_metadata(&self) -> Option<GlyphMetadata> {
        self.value()
            .and_then(|v| GlyphMetadata::try_from(v.clone()).ok())
    }
}

/// Published metadata, with any inline files.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealEnvelope {
    /// Header of a style A reveal; `None` for style B, which has none.
    pub header: Option<RevealHeader>,

    /// Metadata body.
    pub body: RevealBody,

    /// Inline file chunks. Only recoverable when chunk boundaries are known,
    /// so empty when decoded from a single flat buffer.
    pub files: Vec<Vec<u8>>,
}

impl RevealEnvelope {
    /// Returns the parsed metadata value, if the body parsed.
    pub fn metadata(&self) -> Option<&Value> {
        self.body.value()
    }
}

/// An envelope recovered from a script.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphEnvelope {
    /// Commit envelope.
    Commit(CommitEnvelope),

    /// Reveal envelope.
    Reveal(RevealEnvelope),
}

impl GlyphEnvelope {
    /// Returns if this is a reveal.
    pub fn is_reveal(&self) -> bool {
        matches!(self, GlyphEnvelope::Reveal(_))
    }

    /// Returns the commit, if this is one.
    pub fn as_commit(&self) -> Option<&CommitEnvelope> {
        match self {
            GlyphEnvelope::Commit(c) => Some(c),
            GlyphEnvelope::Reveal(_) => None,
        }
    }

    /// Returns the reveal, if this is one.
    pub fn as_reveal(&self) -> Option<&RevealEnvelope> {
        match self {
            GlyphEnvelope::Reveal(r) => Some(r),
            GlyphEnvelope::Commit(_) => None,
        }
    }
}
