//! Glyph identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of a token: the reveal output anchoring it, as `txid:vout`.
///
/// The txid is kept as given; only the `:` separator and the decimal vout
/// are checked when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId {
    txid: String,
    vout: u32,
}

/// Errors from parsing a [`GlyphId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphIdParseError {
    /// No `:` separator.
    #[error("missing ':' separator")]
    MissingSeparator,

    /// The vout was not a decimal `u32`.
    #[error("invalid vout {0:?}")]
    InvalidVout(String),
}

impl GlyphId {
    /// Constructs a new instance.
    pub fn new(txid: impl Into<String>, vout: u32) -> Self {
        Self {
            txid: txid.into(),
            vout,
        }
    }

    /// Gets the txid string.
    pub fn txid(&self) -> &str {
        &self.txid
    }

    /// Gets the output index.
    pub fn vout(&self) -> u32 {
        self.vout
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}

impl FromStr for GlyphId {
    type Err = GlyphIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (txid, vout) = s
            .rsplit_once(':')
            .ok_or(GlyphIdParseError::MissingSeparator)?;
        let vout = vout
            .parse::<u32>()
            .map_err(|_| GlyphIdParseError::InvalidVout(vout.to_string()))?;
        Ok(Self::new(txid, vout))
    }
}

/// Formats a glyph id string.
pub fn get_glyph_id(txid: &str, vout: u32) -> String {
    GlyphId::new(txid, vout).to_string()
}

/// Parses a glyph id string.
pub fn parse_glyph_id(id: &str) -> Result<GlyphId, GlyphIdParseError> {
    id.parse()
}
