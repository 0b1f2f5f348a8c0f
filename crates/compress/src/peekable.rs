//! Sniff the start of a stream without losing it.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::{Chain, Cursor, Read};

/// Holds on to the bytes handed out by [`peek`](Self::peek) so that
/// [`into_reader`](Self::into_reader) can replay them ahead of the rest of
/// the stream.
pub struct PeekableReader<R> {
    inner: R,
    buffer: Vec<u8>,
}

impl<R: Read> PeekableReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, buffer: Vec::new() }
    }

    /// Read up to `limit` bytes from the start of the stream.
    ///
    /// Successive calls do not accumulate: the buffer only grows as far as
    /// the largest `limit` asked for. Returns fewer than `limit` bytes only
    /// when the stream is shorter than that.
    pub fn peek(&mut self, limit: usize) -> Result<&[u8]> {
        if self.buffer.len() >= limit {
            return Ok(&self.buffer[..limit]);
        }
        let needed = (limit - self.buffer.len()) as u64;
        (&mut self.inner).take(needed).read_to_end(&mut self.buffer).or_raise(|| ErrorKind::Read)?;
        Ok(&self.buffer[..self.buffer.len().min(limit)])
    }

    /// Everything peeked so far.
    pub fn head(&self) -> &[u8] {
        &self.buffer
    }

    /// Convert into a [`Read`]er that replays the buffered head, then
    /// streams the rest of the inner reader.
    pub fn into_reader(self) -> Chain<Cursor<Vec<u8>>, R> {
        Cursor::new(self.buffer).chain(self.inner)
    }
}
