use bitcoin::{
    ScriptBuf,
    blockdata::script,
    opcodes::{OP_FALSE, all::OP_RETURN},
    script::PushBytesBuf,
};
use tracing::debug;

use crate::errors::ScriptBuildError;

/// Builds a provably unspendable script carrying reveal chunks.
///
/// Creates a script with the structure `OP_FALSE OP_RETURN <chunk_0> ... <chunk_n>`,
/// one push per chunk as produced by the glyph reveal encoders.
///
/// # Errors
///
/// Returns [`ScriptBuildError`] if a chunk cannot be converted to a `PushBytesBuf`.
pub fn build_reveal_script<C: AsRef<[u8]>>(chunks: &[C]) -> Result<ScriptBuf, ScriptBuildError> {
    let mut builder = data_carrier();
    for (index, chunk) in chunks.iter().enumerate() {
        builder = push_chunk(builder, index, chunk.as_ref())?;
    }

    let script = builder.into_script();
    debug!(chunks = chunks.len(), len = script.len(), "built reveal script");
    Ok(script)
}

/// Builds a provably unspendable script carrying a commit envelope.
///
/// Creates a script with the structure `OP_FALSE OP_RETURN <envelope>`.
///
/// # Errors
///
/// Returns [`ScriptBuildError`] if the envelope cannot be converted to a `PushBytesBuf`.
pub fn build_commit_script(envelope: &[u8]) -> Result<ScriptBuf, ScriptBuildError> {
    let builder = push_chunk(data_carrier(), 0, envelope)?;
    Ok(builder.into_script())
}

fn data_carrier() -> script::Builder {
    script::Builder::new()
        .push_opcode(OP_FALSE)
        .push_opcode(OP_RETURN)
}

fn push_chunk(
    builder: script::Builder,
    index: usize,
    chunk: &[u8],
) -> Result<script::Builder, ScriptBuildError> {
    let push_bytes = PushBytesBuf::try_from(chunk.to_vec()).map_err(|_| {
        ScriptBuildError::ChunkConversion {
            index,
            size: chunk.len(),
        }
    })?;
    Ok(builder.push_slice(push_bytes))
}
