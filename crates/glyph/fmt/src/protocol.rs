//! Protocol identifiers.
//!
//! A token is described by a set of these tags. Each tag switches on one
//! capability and may require other tags and metadata sections to be present,
//! which is checked by [`crate::validate_protocols`] and
//! [`crate::validate_metadata`].

use core::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Glyph protocol identifiers.
///
/// The numeric values are part of the wire format and never change.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolId {
    /// Fungible token.
    Ft = 1,

    /// Non-fungible token.
    Nft = 2,

    /// Data storage.
    Dat = 3,

    /// Decentralized proof-of-work minting. Requires [`ProtocolId::Ft`].
    Dmint = 4,

    /// Mutable metadata. Requires [`ProtocolId::Nft`].
    Mut = 5,

    /// Explicitly burnable. Requires a token protocol.
    Burn = 6,

    /// Container of other tokens. Requires [`ProtocolId::Nft`].
    Container = 7,

    /// Encrypted content. Requires [`ProtocolId::Nft`].
    Encrypted = 8,

    /// Timelocked reveal of encrypted content. Requires
    /// [`ProtocolId::Encrypted`].
    Timelock = 9,

    /// Issuer authority. Requires [`ProtocolId::Nft`].
    Authority = 10,

    /// WAVE name. Requires [`ProtocolId::Nft`] and [`ProtocolId::Mut`].
    Wave = 11,
}

/// Every protocol id, in numeric order.
pub const ALL_PROTOCOLS: [ProtocolId; 11] = [
    ProtocolId::Ft,
    ProtocolId::Nft,
    ProtocolId::Dat,
    ProtocolId::Dmint,
    ProtocolId::Mut,
    ProtocolId::Burn,
    ProtocolId::Container,
    ProtocolId::Encrypted,
    ProtocolId::Timelock,
    ProtocolId::Authority,
    ProtocolId::Wave,
];

/// Optional metadata sections owned by a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `dmint` parameters.
    Dmint,
    /// `mutable` state.
    Mutable,
    /// `container` description.
    Container,
    /// `authority` description.
    Authority,
    /// `crypto` parameters for encrypted content.
    Crypto,
    /// `wave` name record.
    Wave,
}

impl SectionKind {
    /// Returns the metadata field name of the section.
    pub const fn field_name(self) -> &'static str {
        match self {
            SectionKind::Dmint => "dmint",
            SectionKind::Mutable => "mutable",
            SectionKind::Container => "container",
            SectionKind::Authority => "authority",
            SectionKind::Crypto => "crypto",
            SectionKind::Wave => "wave",
        }
    }
}

/// Error returned when a byte is not a known protocol id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown protocol id {0}")]
pub struct UnknownProtocolId(pub u8);

/// Error returned when a string is not a protocol name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown protocol name {0:?}")]
pub struct UnknownProtocolName(pub String);

impl ProtocolId {
    /// Converts the enum to its underlying u8 value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the short upper-case name of the protocol.
    pub const fn name(self) -> &'static str {
        match self {
            ProtocolId::Ft => "FT",
            ProtocolId::Nft => "NFT",
            ProtocolId::Dat => "DAT",
            ProtocolId::Dmint => "DMINT",
            ProtocolId::Mut => "MUT",
            ProtocolId::Burn => "BURN",
            ProtocolId::Container => "CONTAINER",
            ProtocolId::Encrypted => "ENCRYPTED",
            ProtocolId::Timelock => "TIMELOCK",
            ProtocolId::Authority => "AUTHORITY",
            ProtocolId::Wave => "WAVE",
        }
    }

    /// Returns the metadata section this protocol requires, if any.
    pub const fn required_section(self) -> Option<SectionKind> {
        match self {
            ProtocolId::Dmint => Some(SectionKind::Dmint),
            ProtocolId::Container => Some(SectionKind::Container),
            ProtocolId::Authority => Some(SectionKind::Authority),
            ProtocolId::Encrypted => Some(SectionKind::Crypto),
            _ => None,
        }
    }

    /// Returns if the protocol may be the only one a token lists.
    pub const fn is_standalone(self) -> bool {
        matches!(self, ProtocolId::Ft | ProtocolId::Nft | ProtocolId::Dat)
    }
}

impl From<ProtocolId> for u8 {
    fn from(id: ProtocolId) -> Self {
        id as u8
    }
}

impl TryFrom<u8> for ProtocolId {
    type Error = UnknownProtocolId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_PROTOCOLS
            .iter()
            .copied()
            .find(|p| p.as_u8() == value)
            .ok_or(UnknownProtocolId(value))
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProtocolId {
    type Err = UnknownProtocolName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PROTOCOLS
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownProtocolName(s.to_string()))
    }
}
