//! Buffer-level decoder for chunk-framed streams.
//!
//! Strips the framing from a chunked stream and yields only the payload
//! bytes, in order. The grammar is the filter wire format: a hex size line,
//! that many body bytes, a terminator, repeated until a zero-size chunk —
//! which ends the stream at its own line terminator. There are no chunk
//! extensions and no trailer section.

use crate::protocol::{ParseError, PayloadItem};
use bytes::{Buf, BytesMut};
use std::cmp;
use tokio_util::codec::Decoder;
use tracing::trace;

use super::{SizeLineDecoder, TerminatorDecoder};

/// A decoder for chunk-framed byte streams.
///
/// Implements [`Decoder`] over [`BytesMut`]; feed it input as it arrives
/// and it yields [`PayloadItem::Chunk`] for body bytes and
/// [`PayloadItem::Eof`] once the zero-size chunk has been consumed.
/// Body bytes are split out of the source buffer in bulk, so a chunk
/// declared larger than the data on hand is yielded in several pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: State,
    size_line: SizeLineDecoder,
    terminator: TerminatorDecoder,
    remaining: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Parsing the chunk-size line
    Size,
    /// Extracting body bytes
    Body,
    /// Consuming the terminator after a body
    BodyTerminator,
    /// Zero-size chunk consumed; the stream is complete
    End,
}

impl ChunkedDecoder {
    /// Creates a decoder positioned at the first chunk-size line.
    pub fn new() -> Self {
        Self {
            state: State::Size,
            size_line: SizeLineDecoder::new(),
            terminator: TerminatorDecoder::new(),
            remaining: 0,
        }
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ChunkedDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Decodes as much of the input buffer as the current state allows.
    ///
    /// # Returns
    /// - `Ok(Some(PayloadItem::Chunk(bytes)))` when body bytes are available
    /// - `Ok(Some(PayloadItem::Eof))` once the stream is complete (sticky)
    /// - `Ok(None)` when more input is needed
    /// - `Err(ParseError)` on a framing violation
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                State::End => {
                    trace!("finished reading chunked data");
                    return Ok(Some(PayloadItem::Eof));
                }

                State::Size => {
                    let size = loop {
                        if src.is_empty() {
                            return Ok(None);
                        }
                        if let Some(size) = self.size_line.feed(src.get_u8())? {
                            break size;
                        }
                    };

                    if size == 0 {
                        // the zero chunk carries no body, and its own line
                        // terminator was part of the size line
                        self.state = State::End;
                    } else {
                        trace!(size, "decoded chunk size");
                        self.remaining = size;
                        self.state = State::Body;
                    }
                }

                State::Body => {
                    if src.is_empty() {
                        return Ok(None);
                    }

                    // cap remaining bytes at the max capacity of usize
                    let remaining = match self.remaining {
                        r if r > usize::MAX as u64 => usize::MAX,
                        r => r as usize,
                    };
                    let read_size = cmp::min(remaining, src.len());

                    self.remaining -= read_size as u64;
                    if self.remaining == 0 {
                        self.terminator = TerminatorDecoder::new();
                        self.state = State::BodyTerminator;
                    }

                    let bytes = src.split_to(read_size).freeze();
                    trace!(len = bytes.len(), "read chunked bytes");
                    return Ok(Some(PayloadItem::Chunk(bytes)));
                }

                State::BodyTerminator => {
                    loop {
                        if src.is_empty() {
                            return Ok(None);
                        }
                        if self.terminator.feed(src.get_u8())? {
                            break;
                        }
                    }
                    self.size_line = SizeLineDecoder::new();
                    self.state = State::Size;
                }
            }
        }
    }
}
