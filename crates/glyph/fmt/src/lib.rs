//! Glyph token metadata format.
//!
//! A token is created in two steps. A commit transaction carries a short
//! fixed-layout envelope holding a hash of the token's metadata. A later
//! reveal transaction publishes the metadata itself, as canonical JSON, plus
//! any inline files. Anyone can then check the revealed metadata against the
//! committed hash.
//!
//! This crate covers the byte level of that scheme: encoding envelopes,
//! recovering them from untrusted script bytes, and checking metadata and
//! protocol combinations. Placing the chunks into actual script pushes lives
//! in `glyph-envelope-fmt`.
//!
//! ```
//! use glyph_fmt::{
//!     CommitRequest, Content, FileEntry, GlyphMetadata, ProtocolId, compute_commit_hash,
//!     decode_reveal_chunks, encode_commit_envelope, encode_reveal_envelope, validate_metadata,
//! };
//!
//! let image = b"\x89PNG...";
//! let mut meta = GlyphMetadata::new("art", &[ProtocolId::Nft])
//!     .with_name("Sunrise")
//!     .with_content(Content::with_primary(FileEntry::for_bytes("sun.png", "image/png", image)));
//!
//! let hash = compute_commit_hash(&mut meta).unwrap();
//! let commit = encode_commit_envelope(&CommitRequest::new(&hash)).unwrap();
//! assert_eq!(&commit[..3], b"gly");
//!
//! let chunks = encode_reveal_envelope(&mut meta, &[image.as_slice()]).unwrap();
//! let reveal = decode_reveal_chunks(&chunks).unwrap();
//! assert_eq!(reveal.files, vec![image.to_vec()]);
//!
//! let decoded = reveal.body.to_metadata().unwrap();
//! assert_eq!(validate_metadata(&decoded), Ok(()));
//! ```

#[cfg(feature = "bitcoin")]
mod bitcoin;
mod canonical;
mod config;
pub mod constants;
mod decoder;
mod encoder;
mod envelope;
mod error;
mod hasher;
mod id;
mod magic;
mod metadata;
mod protocol;
mod reader;
mod serde;
mod tx;
mod validator;

pub use canonical::{canonicalize, to_canonical_bytes};
pub use config::GlyphConfig;
pub use constants::{DEFAULT_VERSION, GLYPH_MAGIC, flags};
pub use decoder::{
    contains_magic, decode_commit_envelope, decode_envelope, decode_reveal_chunks,
    decode_reveal_envelope,
};
pub use encoder::{
    CommitRequest, commit_hash_bytes, compute_commit_hash, compute_commit_hash_with,
    encode_commit_envelope, encode_metadata, encode_reveal_envelope, encode_reveal_envelope_b,
};
pub use envelope::{
    CommitEnvelope, ControllerRef, GlyphEnvelope, RevealBody, RevealEnvelope, RevealHeader,
};
pub use error::{EncodeError, EncodeResult, FormatError, SizeLimitError};
pub use hasher::{CommitHasher, Hash32, Sha256Hasher, sha256_hex};
pub use id::{GlyphId, GlyphIdParseError, get_glyph_id, parse_glyph_id};
pub use magic::{MAGIC_BYTES_LEN, MagicBytes};
pub use metadata::{
    Content, ExternalRef, FileEntry, FileHash, GlyphMetadata, Royalty, RoyaltySplit, Section,
};
pub use protocol::{
    ALL_PROTOCOLS, ProtocolId, SectionKind, UnknownProtocolId, UnknownProtocolName,
};
pub use reader::{EnvelopeReader, ReadError};
pub use tx::{
    GlyphTx, ParsedGlyphTx, RawTx, TxLocation, is_glyph_transaction, parse_glyph_transaction,
};
pub use validator::{
    MetadataViolation, ProtocolViolation, TokenKind, get_token_type, validate_metadata,
    validate_metadata_value, validate_protocols,
};
