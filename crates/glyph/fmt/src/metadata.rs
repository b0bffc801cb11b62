//! Token metadata records.
//!
//! [`GlyphMetadata`] is the value that gets canonicalized, hashed into a
//! commit and published in a reveal. The core record (`v`, `type`, `p`) and
//! every optional field are `Option`s so that a record decoded from untrusted
//! bytes can still be checked field by field, with every missing field
//! reported by the validator. Fields this crate does not model are kept in
//! `extra` so decoding and re-encoding a record loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hasher::sha256_hex;
use crate::protocol::{ProtocolId, SectionKind};

/// Free-form protocol-owned section, such as `dmint` or `container`.
pub type Section = Map<String, Value>;

/// Glyph token metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlyphMetadata {
    /// Version tag. Filled with the default version on encode if missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<u8>,

    /// Free-form token type label.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Raw protocol ids, in encoding order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<Vec<u8>>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Ticker symbol for fungible tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Attached files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Creator royalty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub royalty: Option<Royalty>,

    /// dMint parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmint: Option<Section>,

    /// Mutable state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutable: Option<Section>,

    /// Container description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Section>,

    /// Authority description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Section>,

    /// Encryption parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto: Option<Section>,

    /// WAVE name record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave: Option<Section>,

    /// Any other top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GlyphMetadata {
    /// Constructs a record with a type and protocol list. The version is
    /// left unset.
    pub fn new(token_type: impl Into<String>, protocols: &[ProtocolId]) -> Self {
        Self {
            token_type: Some(token_type.into()),
            p: Some(protocols.iter().map(|p| p.as_u8()).collect()),
            ..Default::default()
        }
    }

    /// Sets the version tag.
    pub fn with_version(mut self, v: u8) -> Self {
        self.v = Some(v);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Sets the ticker.
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Sets the content.
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Sets the royalty.
    pub fn with_royalty(mut self, royalty: Royalty) -> Self {
        self.royalty = Some(royalty);
        self
    }

    /// Sets a protocol-owned section.
    pub fn with_section(mut self, kind: SectionKind, section: Section) -> Self {
        *self.section_slot(kind) = Some(section);
        self
    }

    /// Raw protocol ids, empty if the list is missing.
    pub fn protocols(&self) -> &[u8] {
        self.p.as_deref().unwrap_or_default()
    }

    /// Returns if the protocol list contains `id`.
    pub fn has_protocol(&self, id: ProtocolId) -> bool {
        self.protocols().contains(&id.as_u8())
    }

    /// Returns a protocol-owned section, if present.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        match kind {
            SectionKind::Dmint => self.dmint.as_ref(),
            SectionKind::Mutable => self.mutable.as_ref(),
            SectionKind::Container => self.container.as_ref(),
            SectionKind::Authority => self.authority.as_ref(),
            SectionKind::Crypto => self.crypto.as_ref(),
            SectionKind::Wave => self.wave.as_ref(),
        }
    }

    fn section_slot(&mut self, kind: SectionKind) -> &mut Option<Section> {
        match kind {
            SectionKind::Dmint => &mut self.dmint,
            SectionKind::Mutable => &mut self.mutable,
            SectionKind::Container => &mut self.container,
            SectionKind::Authority => &mut self.authority,
            SectionKind::Crypto => &mut self.crypto,
            SectionKind::Wave => &mut self.wave,
        }
    }

    /// Converts into a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl TryFrom<Value> for GlyphMetadata {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Files attached to a token.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    /// Main file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<FileEntry>,

    /// Additional files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,

    /// Files stored outside the chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<Vec<ExternalRef>>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Content {
    /// Constructs content with just a primary file.
    pub fn with_primary(primary: FileEntry) -> Self {
        Self {
            primary: Some(primary),
            ..Default::default()
        }
    }
}

/// Description of one file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path of the file within the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,

    /// Length in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Digest of the file bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<FileHash>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileEntry {
    /// Describes `bytes` as a file at `path`, hashing them with SHA-256.
    pub fn for_bytes(path: impl Into<String>, mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            path: Some(path.into()),
            mime: Some(mime.into()),
            size: Some(bytes.len() as u64),
            hash: Some(FileHash {
                algo: Some("sha256".to_string()),
                hex: Some(sha256_hex(bytes)),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }
}

/// File digest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileHash {
    /// Digest algorithm name, such as `sha256`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo: Option<String>,

    /// Lowercase hex digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file stored outside the chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalRef {
    /// Where to fetch the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Description of the referenced file.
    #[serde(flatten)]
    pub file: FileEntry,
}

/// Creator royalty on transfers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Royalty {
    /// Royalty in basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bps: Option<i64>,

    /// Address receiving the royalty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Division of the royalty between several addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splits: Option<Vec<RoyaltySplit>>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One share of a royalty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoyaltySplit {
    /// Receiving address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Share in basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bps: Option<i64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
