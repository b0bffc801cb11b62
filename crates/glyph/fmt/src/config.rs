//! Encoder configuration.

use crate::constants::{
    DEFAULT_VERSION, MAX_INLINE_FILE_SIZE, MAX_METADATA_SIZE, MAX_TOTAL_INLINE_SIZE,
    is_known_version,
};
use crate::error::FormatError;

/// Config for encoding envelopes.
///
/// The defaults are the protocol limits. The free encoding functions in this
/// crate use [`GlyphConfig::default`]; construct a config directly to encode
/// with other bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphConfig {
    max_metadata_size: usize,
    max_inline_file_size: usize,
    max_total_inline_size: usize,
    default_version: u8,
}

impl GlyphConfig {
    /// Constructs a config with the protocol limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest encoded metadata accepted in a style A reveal.
    pub fn with_max_metadata_size(mut self, size: usize) -> Self {
        self.max_metadata_size = size;
        self
    }

    /// Sets the largest single inline file accepted in a style A reveal.
    pub fn with_max_inline_file_size(mut self, size: usize) -> Self {
        self.max_inline_file_size = size;
        self
    }

    /// Sets the largest combined inline file size accepted in a style A
    /// reveal.
    pub fn with_max_total_inline_size(mut self, size: usize) -> Self {
        self.max_total_inline_size = size;
        self
    }

    /// Sets the version tag written into metadata and envelope headers.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedVersion`] unless the version is one
    /// of [`KNOWN_VERSIONS`](crate::constants::KNOWN_VERSIONS), since the
    /// decoder rejects any other header.
    pub fn with_default_version(mut self, version: u8) -> Result<Self, FormatError> {
        if !is_known_version(version) {
            return Err(FormatError::UnsupportedVersion(version));
        }
        self.default_version = version;
        Ok(self)
    }

    /// Gets the metadata size limit.
    pub fn max_metadata_size(&self) -> usize {
        self.max_metadata_size
    }

    /// Gets the single inline file size limit.
    pub fn max_inline_file_size(&self) -> usize {
        self.max_inline_file_size
    }

    /// Gets the combined inline file size limit.
    pub fn max_total_inline_size(&self) -> usize {
        self.max_total_inline_size
    }

    /// Gets the default version tag.
    pub fn default_version(&self) -> u8 {
        self.default_version
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            max_metadata_size: MAX_METADATA_SIZE,
            max_inline_file_size: MAX_INLINE_FILE_SIZE,
            max_total_inline_size: MAX_TOTAL_INLINE_SIZE,
            default_version: DEFAULT_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::GlyphMetadata;
    use crate::protocol::ProtocolId;

    #[test]
    fn test_defaults_are_protocol_limits() {
        let config = GlyphConfig::new();
        assert_eq!(config, GlyphConfig::default());
        assert_eq!(config.max_metadata_size(), 262_144);
        assert_eq!(config.max_inline_file_size(), 1_048_576);
        assert_eq!(config.max_total_inline_size(), 10_485_760);
        assert_eq!(config.default_version(), 2);
    }

    #[test]
    fn test_custom_config_encodes() {
        let config = GlyphConfig::new()
            .with_default_version(1)
            .unwrap()
            .with_max_inline_file_size(4)
            .with_max_total_inline_size(6);

        let mut meta = GlyphMetadata::new("token", &[ProtocolId::Ft]).with_ticker("GLY");
        let chunks = config
            .encode_reveal_envelope(&mut meta, &[b"abcd".as_slice(), b"ef".as_slice()])
            .unwrap();
        assert_eq!(meta.v, Some(1));
        assert_eq!(chunks[0], [b'g', b'l', b'y', 1, 0x80]);

        let err = config
            .encode_reveal_envelope(&mut meta, &[b"abcd".as_slice(), b"efg".as_slice()])
            .unwrap_err();
        assert!(err.is_size_limit());

        let err = config
            .with_max_metadata_size(8)
            .encode_reveal_envelope(&mut meta, &[])
            .unwrap_err();
        assert!(err.is_size_limit());
    }

    #[test]
    fn test_unknown_version_rejected() {
        for version in [0, 3, 0xff] {
            let err = GlyphConfig::new().with_default_version(version).unwrap_err();
            assert!(matches!(err, FormatError::UnsupportedVersion(v) if v == version));
        }

        // Every accepted version produces a header the decoder reads back.
        for version in crate::constants::KNOWN_VERSIONS {
            let config = GlyphConfig::new().with_default_version(version).unwrap();
            let mut meta = GlyphMetadata::new("data", &[ProtocolId::Dat]);
            let chunks = config.encode_reveal_envelope(&mut meta, &[]).unwrap();
            let reveal = crate::decoder::decode_reveal_chunks(&chunks).unwrap();
            assert_eq!(reveal.header.map(|h| h.version), Some(version));
        }
    }
}
