//! In-memory [`Channel`] for driving the filters in tests.

use std::cmp;
use std::io;

use crate::channel::Channel;

/// A channel over an in-memory source and sink.
///
/// `transfer` is an ordinary copy, optionally capped per call to exercise
/// the drivers' partial-transfer loops; `available` reports the unread
/// remainder of the source, so end of input is observed exactly where a
/// drained descriptor would report it.
pub(crate) struct MemoryChannel {
    input: Vec<u8>,
    pos: usize,
    pub output: Vec<u8>,
    max_transfer: usize,
}

impl MemoryChannel {
    pub fn new(input: &[u8]) -> Self {
        Self::with_max_transfer(input, usize::MAX)
    }

    pub fn with_max_transfer(input: &[u8], max_transfer: usize) -> Self {
        Self { input: input.to_vec(), pos: 0, output: Vec::new(), max_transfer }
    }

    /// Source bytes not yet consumed.
    pub fn unread(&self) -> &[u8] {
        &self.input[self.pos..]
    }
}

impl Channel for MemoryChannel {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.input.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(buf);
        Ok(())
    }

    fn transfer(&mut self, len: usize) -> io::Result<usize> {
        let moved = cmp::min(cmp::min(len, self.max_transfer), self.unread().len());
        self.output.extend_from_slice(&self.input[self.pos..self.pos + moved]);
        self.pos += moved;
        Ok(moved)
    }

    fn wait_readable(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(self.unread().len())
    }
}
