//! Encoding of metadata, commit envelopes and reveal envelopes.
//!
//! Commit envelope layout:
//!
//! ```text
//! [0..3]   magic "gly"
//! [3]      version
//! [4]      flags
//! [5..37]  commit hash
//! [..+32]  content root, iff flags & HAS_CONTENT_ROOT
//! [..+36]  controller, iff flags & HAS_CONTROLLER
//! ```
//!
//! A reveal is a list of chunks, each meant to be its own push in a script.
//! Style A opens with a `magic | version | flags` header chunk, style B with
//! the bare magic. Both continue with the metadata chunk and then one chunk
//! per inline file.

use tracing::debug;

use crate::canonical::to_canonical_bytes;
use crate::config::GlyphConfig;
use crate::constants::{
    COMMIT_HASH_LEN, CONTENT_ROOT_LEN, CONTROLLER_LEN, GLYPH_MAGIC, HEADER_LEN, flags,
};
use crate::envelope::ControllerRef;
use crate::error::{EncodeResult, FormatError, SizeLimitError};
use crate::hasher::{CommitHasher, Hash32, Sha256Hasher};
use crate::metadata::GlyphMetadata;

/// Inputs of a commit envelope.
#[derive(Debug, Clone, Copy)]
pub struct CommitRequest<'a> {
    /// Commit hash; must be exactly 32 bytes.
    pub commit_hash: &'a [u8],

    /// Caller-chosen flag bits. Presence bits are added automatically.
    pub flags: u8,

    /// Optional content root.
    pub content_root: Option<Hash32>,

    /// Optional controlling outpoint.
    pub controller: Option<ControllerRef>,
}

impl<'a> CommitRequest<'a> {
    /// Constructs a request with no flags and no optional fields.
    pub fn new(commit_hash: &'a [u8]) -> Self {
        Self {
            commit_hash,
            flags: 0,
            content_root: None,
            controller: None,
        }
    }

    /// Sets caller-chosen flag bits.
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the content root.
    pub fn with_content_root(mut self, root: Hash32) -> Self {
        self.content_root = Some(root);
        self
    }

    /// Sets the controller.
    pub fn with_controller(mut self, controller: ControllerRef) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Flag bits as they will be written.
    ///
    /// The content root and controller bits always follow the fields
    /// actually supplied; caller-set values for them are dropped.
    pub fn effective_flags(&self) -> u8 {
        let mut f = self.flags & !(flags::HAS_CONTENT_ROOT | flags::HAS_CONTROLLER);
        if self.content_root.is_some() {
            f |= flags::HAS_CONTENT_ROOT;
        }
        if self.controller.is_some() {
            f |= flags::HAS_CONTROLLER;
        }
        f
    }
}

impl GlyphConfig {
    /// Encodes metadata into canonical bytes.
    ///
    /// If `metadata.v` is missing it is set to the default version on the
    /// caller's record before encoding.
    pub fn encode_metadata(&self, metadata: &mut GlyphMetadata) -> EncodeResult<Vec<u8>> {
        if metadata.v.is_none() {
            metadata.v = Some(self.default_version());
        }

        let value = metadata.to_value()?;
        Ok(to_canonical_bytes(&value)?)
    }

    /// Computes the commit hash of metadata with the given hasher.
    pub fn compute_commit_hash_with<H: CommitHasher>(
        &self,
        metadata: &mut GlyphMetadata,
    ) -> EncodeResult<Hash32> {
        let bytes = self.encode_metadata(metadata)?;
        Ok(H::hash(&bytes))
    }

    /// Encodes a commit envelope.
    pub fn encode_commit_envelope(&self, req: &CommitRequest<'_>) -> EncodeResult<Vec<u8>> {
        if req.commit_hash.is_empty() {
            return Err(FormatError::MissingCommitHash.into());
        }
        if req.commit_hash.len() != COMMIT_HASH_LEN {
            return Err(FormatError::InvalidCommitHashLen(req.commit_hash.len()).into());
        }

        let mut buf =
            Vec::with_capacity(HEADER_LEN + COMMIT_HASH_LEN + CONTENT_ROOT_LEN + CONTROLLER_LEN);
        buf.extend_from_slice(GLYPH_MAGIC.as_bytes());
        buf.push(self.default_version());
        buf.push(req.effective_flags());
        buf.extend_from_slice(req.commit_hash);

        if let Some(root) = &req.content_root {
            buf.extend_from_slice(root);
        }
        if let Some(controller) = &req.controller {
            buf.extend_from_slice(controller.as_bytes());
        }

        debug!(len = buf.len(), flags = req.effective_flags(), "encoded commit envelope");
        Ok(buf)
    }

    /// Encodes a style A reveal into chunks, enforcing the size limits.
    pub fn encode_reveal_envelope(
        &self,
        metadata: &mut GlyphMetadata,
        files: &[&[u8]],
    ) -> EncodeResult<Vec<Vec<u8>>> {
        let meta = self.encode_metadata(metadata)?;
        if meta.len() > self.max_metadata_size() {
            debug!(size = meta.len(), "reveal metadata over limit");
            return Err(SizeLimitError::Metadata {
                size: meta.len(),
                limit: self.max_metadata_size(),
            }
            .into());
        }

        let mut total = 0usize;
        for (index, file) in files.iter().enumerate() {
            if file.len() > self.max_inline_file_size() {
                debug!(%index, size = file.len(), "inline file over limit");
                return Err(SizeLimitError::InlineFile {
                    index,
                    size: file.len(),
                    limit: self.max_inline_file_size(),
                }
                .into());
            }
            total += file.len();
        }
        if total > self.max_total_inline_size() {
            debug!(size = total, "inline files over total limit");
            return Err(SizeLimitError::TotalInline {
                size: total,
                limit: self.max_total_inline_size(),
            }
            .into());
        }

        let mut header = Vec::with_capacity(HEADER_LEN);
        header.extend_from_slice(GLYPH_MAGIC.as_bytes());
        header.push(self.default_version());
        header.push(flags::IS_REVEAL);

        let chunks = assemble_chunks(header, meta, files);
        debug!(chunks = chunks.len(), "encoded reveal envelope");
        Ok(chunks)
    }

    /// Encodes a style B reveal into chunks.
    ///
    /// No size limits are applied here; any bound on large multi-push
    /// reveals belongs to whoever embeds them.
    pub fn encode_reveal_envelope_b(
        &self,
        metadata: &mut GlyphMetadata,
        files: &[&[u8]],
    ) -> EncodeResult<Vec<Vec<u8>>> {
        let meta = self.encode_metadata(metadata)?;
        let chunks = assemble_chunks(GLYPH_MAGIC.as_bytes().to_vec(), meta, files);
        debug!(chunks = chunks.len(), "encoded style B reveal envelope");
        Ok(chunks)
    }
}

fn assemble_chunks(first: Vec<u8>, meta: Vec<u8>, files: &[&[u8]]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::with_capacity(2 + files.len());
    chunks.push(first);
    chunks.push(meta);
    chunks.extend(files.iter().map(|f| f.to_vec()));
    chunks
}

/// Encodes metadata into canonical bytes, filling a missing version.
pub fn encode_metadata(metadata: &mut GlyphMetadata) -> EncodeResult<Vec<u8>> {
    GlyphConfig::default().encode_metadata(metadata)
}

/// Computes the SHA-256 commit hash of metadata.
pub fn compute_commit_hash(metadata: &mut GlyphMetadata) -> EncodeResult<Hash32> {
    compute_commit_hash_with::<Sha256Hasher>(metadata)
}

/// Computes the commit hash of metadata with the given hasher.
pub fn compute_commit_hash_with<H: CommitHasher>(
    metadata: &mut GlyphMetadata,
) -> EncodeResult<Hash32> {
    GlyphConfig::default().compute_commit_hash_with::<H>(metadata)
}

/// Computes the SHA-256 commit hash of already encoded bytes.
pub fn commit_hash_bytes(bytes: &[u8]) -> Hash32 {
    Sha256Hasher::hash(bytes)
}

/// Encodes a commit envelope.
pub fn encode_commit_envelope(req: &CommitRequest<'_>) -> EncodeResult<Vec<u8>> {
    GlyphConfig::default().encode_commit_envelope(req)
}

/// Encodes a style A reveal into chunks.
pub fn encode_reveal_envelope(
    metadata: &mut GlyphMetadata,
    files: &[&[u8]],
) -> EncodeResult<Vec<Vec<u8>>> {
    GlyphConfig::default().encode_reveal_envelope(metadata, files)
}

/// Encodes a style B reveal into chunks.
pub fn encode_reveal_envelope_b(
    metadata: &mut GlyphMetadata,
    files: &[&[u8]],
) -> EncodeResult<Vec<Vec<u8>>> {
    GlyphConfig::default().encode_reveal_envelope_b(metadata, files)
}
