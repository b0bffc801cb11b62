use thiserror::Error;

/// Errors that can occur while building glyph scripts.
#[derive(Debug, Error)]
pub enum ScriptBuildError {
    /// Failed to convert a chunk into `PushBytesBuf`.
    #[error("failed to convert {size} byte chunk {index} to push bytes buffer")]
    ChunkConversion {
        /// Position of the chunk.
        index: usize,
        /// Size of the chunk that failed to convert.
        size: usize,
    },
}
