//! Bitcoin script glue for glyph envelopes.
//!
//! `glyph-fmt` produces envelopes as byte chunks. This crate places them into
//! scripts and gets them back out again:
//!
//! ```text
//! OP_FALSE OP_RETURN <chunk_0> ... <chunk_n>
//! ```
//!
//! A commit envelope is a single chunk. A reveal is a header chunk, a
//! metadata chunk and one chunk per inline file. Parsing works on the
//! pushes of the script rather than its flat bytes, so inline files are
//! recovered intact.
//!
//! # Examples
//!
//! ```
//! use glyph_envelope_fmt::{builder::build_reveal_script, parser::parse_reveal_script};
//! use glyph_fmt::{GlyphMetadata, ProtocolId, encode_reveal_envelope};
//!
//! let mut meta = GlyphMetadata::new("token", &[ProtocolId::Ft]).with_ticker("GLY");
//! let chunks = encode_reveal_envelope(&mut meta, &[b"readme".as_slice()]).unwrap();
//!
//! let script = build_reveal_script(&chunks).unwrap();
//! let reveal = parse_reveal_script(&script).unwrap();
//! assert_eq!(reveal.files, vec![b"readme".to_vec()]);
//! ```

/// Script builders.
pub mod builder;

/// Error types for script operations.
pub mod errors;

/// Script parsers.
pub mod parser;
