use std::fmt;
use std::str;

/// Length of magic bytes in bytes.
pub const MAGIC_BYTES_LEN: usize = 3;

/// Magic bytes identifier ([`MAGIC_BYTES_LEN`]-byte ASCII string).
///
/// Envelopes are located inside opaque script buffers by searching for
/// these bytes, so a match is only a hint until the fields after it parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MagicBytes([u8; MAGIC_BYTES_LEN]);

impl MagicBytes {
    /// Creates a new `MagicBytes` from a [`MAGIC_BYTES_LEN`]-byte array.
    pub const fn new(bytes: [u8; MAGIC_BYTES_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the magic bytes as a byte array.
    pub const fn as_bytes(&self) -> &[u8; MAGIC_BYTES_LEN] {
        &self.0
    }

    /// Returns the magic bytes as a string slice if valid ASCII.
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.0).ok()
    }

    /// Returns the offset of the first occurrence of the magic in `buf`.
    pub fn find_in(&self, buf: &[u8]) -> Option<usize> {
        buf.windows(MAGIC_BYTES_LEN).position(|w| w == self.0)
    }

    /// Returns if `buf` starts with the magic.
    pub fn is_prefix_of(&self, buf: &[u8]) -> bool {
        buf.starts_with(&self.0)
    }
}

impl AsRef<[u8]> for MagicBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MagicBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "{:?}", self.0),
        }
    }
}
