//! Protocol constants: version tags, envelope flag bits and size limits.

use crate::magic::MagicBytes;

/// Magic bytes opening every glyph envelope (`gly`).
pub const GLYPH_MAGIC: MagicBytes = MagicBytes::new(*b"gly");

/// Version tag of the first glyph format.
pub const GLYPH_V1: u8 = 1;

/// Version tag of the current glyph format.
pub const GLYPH_V2: u8 = 2;

/// Version written when the caller does not choose one.
pub const DEFAULT_VERSION: u8 = GLYPH_V2;

/// Version tags a decoder accepts.
pub const KNOWN_VERSIONS: [u8; 2] = [GLYPH_V1, GLYPH_V2];

/// Returns if the version tag is one we know how to read.
pub fn is_known_version(version: u8) -> bool {
    KNOWN_VERSIONS.contains(&version)
}

/// Envelope flag bits.
pub mod flags {
    /// A 32-byte content root follows the commit hash.
    pub const HAS_CONTENT_ROOT: u8 = 0x01;

    /// A 36-byte controller reference follows the commit hash (and root).
    pub const HAS_CONTROLLER: u8 = 0x02;

    /// Hint that the metadata carries a profile. Carries no payload.
    pub const HAS_PROFILE_HINT: u8 = 0x04;

    /// The envelope is a reveal rather than a commit.
    pub const IS_REVEAL: u8 = 0x80;
}

/// Length of a commit hash.
pub const COMMIT_HASH_LEN: usize = 32;

/// Length of a content root.
pub const CONTENT_ROOT_LEN: usize = 32;

/// Length of a controller reference (txid plus little-endian vout).
pub const CONTROLLER_LEN: usize = 36;

/// Length of the envelope header: magic, version and flags.
pub const HEADER_LEN: usize = crate::magic::MAGIC_BYTES_LEN + 2;

/// Maximum length of `name`, in UTF-8 bytes.
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length of `desc`, in UTF-8 bytes.
pub const MAX_DESC_LEN: usize = 4096;

/// Maximum length of a file `path`, in UTF-8 bytes.
pub const MAX_PATH_LEN: usize = 512;

/// Maximum length of a file `mime`, in UTF-8 bytes.
pub const MAX_MIME_LEN: usize = 128;

/// Maximum length of encoded metadata.
pub const MAX_METADATA_SIZE: usize = 262_144;

/// Maximum length of a commit envelope.
///
/// This and the other envelope bounds without a `B` suffix are advisory, for
/// whoever embeds envelopes in transactions. The codec does not enforce them:
/// a style A reveal may carry up to [`MAX_METADATA_SIZE`] of metadata, more
/// than [`MAX_REVEAL_ENVELOPE_SIZE`].
pub const MAX_COMMIT_ENVELOPE_SIZE: usize = 102_400;

/// Advisory maximum length of a style A reveal envelope.
pub const MAX_REVEAL_ENVELOPE_SIZE: usize = 102_400;

/// Maximum length of a style B reveal envelope.
pub const MAX_REVEAL_ENVELOPE_B_SIZE: usize = 12_582_912;

/// Advisory maximum length of an update envelope.
pub const MAX_UPDATE_ENVELOPE_SIZE: usize = 65_536;

/// Maximum length of a single inline file.
pub const MAX_INLINE_FILE_SIZE: usize = 1_048_576;

/// Maximum combined length of all inline files in one reveal.
pub const MAX_TOTAL_INLINE_SIZE: usize = 10_485_760;

/// Maximum number of protocol ids a token may list.
pub const MAX_PROTOCOLS: usize = 16;

/// Largest royalty in basis points.
pub const MAX_ROYALTY_BPS: i64 = 10_000;
