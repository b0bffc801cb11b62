//! Cursor over an untrusted envelope buffer.

use thiserror::Error;

/// Tried to read past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("would overrun end of input (wanted {wanted}, {remaining} left)")]
pub struct ReadError {
    /// Bytes the read needed.
    pub wanted: usize,
    /// Bytes that were left.
    pub remaining: usize,
}

/// Reader for a flat byte slice. Every read checks the remaining length
/// before copying anything.
#[derive(Debug, Clone)]
pub struct EnvelopeReader<'b> {
    buf: &'b [u8],
    at: usize,
}

impl<'b> EnvelopeReader<'b> {
    /// Constructs a new instance starting at the beginning of `buf`.
    pub fn new(buf: &'b [u8]) -> Self {
        Self { buf, at: 0 }
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.at
    }

    fn take(&mut self, n: usize) -> Result<&'b [u8], ReadError> {
        if n > self.remaining() {
            return Err(ReadError {
                wanted: n,
                remaining: self.remaining(),
            });
        }

        let out = &self.buf[self.at..self.at + n];
        self.at += n;
        Ok(out)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a fixed-size array.
    pub fn read_arr<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut buf = [0; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Consumes and returns everything left, which might be empty.
    pub fn read_rest(&mut self) -> &'b [u8] {
        let rest = &self.buf[self.at..];
        self.at = self.buf.len();
        rest
    }
}
