use thiserror::Error;

/// Malformed or missing encoder input.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No commit hash was supplied.
    #[error("missing commit hash")]
    MissingCommitHash,

    /// The commit hash was not 32 bytes long.
    #[error("commit hash must be 32 bytes (got {0})")]
    InvalidCommitHashLen(usize),

    /// A version tag decoders do not accept.
    #[error("unsupported version {0}")]
    UnsupportedVersion(u8),

    /// The metadata could not be serialized.
    #[error("metadata serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Encoder input exceeding a declared size limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeLimitError {
    /// Encoded metadata is too large.
    #[error("metadata is {size} bytes, exceeds {limit} byte limit")]
    Metadata {
        /// Encoded metadata length.
        size: usize,
        /// Limit that was exceeded.
        limit: usize,
    },

    /// A single inline file is too large.
    #[error("inline file {index} is {size} bytes, exceeds {limit} byte limit")]
    InlineFile {
        /// Position of the file in the reveal.
        index: usize,
        /// File length.
        size: usize,
        /// Limit that was exceeded.
        limit: usize,
    },

    /// All inline files together are too large.
    #[error("inline files total {size} bytes, exceeds {limit} byte limit")]
    TotalInline {
        /// Combined file length.
        size: usize,
        /// Limit that was exceeded.
        limit: usize,
    },
}

/// Errors from encoding metadata and envelopes.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Input was malformed.
    #[error("format: {0}")]
    Format(#[from] FormatError),

    /// Input was too large.
    #[error("size limit: {0}")]
    SizeLimit(#[from] SizeLimitError),
}

impl EncodeError {
    /// Returns if this error came from a size limit.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, EncodeError::SizeLimit(_))
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Format(FormatError::Serialize(err))
    }
}

/// Wrapper result type.
pub type EncodeResult<T> = Result<T, EncodeError>;
