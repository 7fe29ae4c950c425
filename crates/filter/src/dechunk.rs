//! The decoder driver: chunk-framed input, raw payload output.

use std::cmp;

use pipechunk_codec::codec::{MAX_CHUNK_SIZE, SizeLineDecoder, TerminatorDecoder};
use tracing::trace;

use crate::channel::Channel;
use crate::error::FilterError;

/// Strips chunk framing from the channel's source and forwards only the
/// payload bytes to its sink.
///
/// One chunk per iteration: parse the size line byte by byte, bulk-move
/// exactly that many body bytes, consume the terminator. A zero-size chunk
/// completes the stream — its own line terminator is the last input byte
/// consumed.
///
/// # Errors
/// Fails on any framing violation, on end of input while a size line, body
/// or terminator is incomplete, and on any underlying I/O failure. Payload
/// bytes already forwarded are not retracted.
pub fn dechunk<C: Channel>(channel: &mut C) -> Result<(), FilterError> {
    loop {
        let mut size_line = SizeLineDecoder::new();
        let size = loop {
            let byte = channel
                .read_byte()
                .map_err(|e| FilterError::io("reading chunk size", e))?
                .ok_or_else(|| FilterError::unexpected_eof(size_line.expecting()))?;
            if let Some(size) = size_line.feed(byte)? {
                break size;
            }
        };

        if size == 0 {
            trace!("zero chunk, stream complete");
            return Ok(());
        }

        trace!(size, "copying chunk body");
        copy_body(channel, size)?;

        let mut terminator = TerminatorDecoder::new();
        loop {
            let byte = channel
                .read_byte()
                .map_err(|e| FilterError::io("reading chunk terminator", e))?
                .ok_or_else(|| FilterError::unexpected_eof(terminator.expecting()))?;
            if terminator.feed(byte)? {
                break;
            }
        }
    }
}

/// Bulk-moves `size` body bytes source-to-sink, looping over partial
/// transfers. Zero progress means the source closed mid-body.
fn copy_body<C: Channel>(channel: &mut C, size: u64) -> Result<(), FilterError> {
    let mut remaining = size;
    while remaining > 0 {
        let want = cmp::min(remaining, MAX_CHUNK_SIZE as u64) as usize;
        let moved = channel.transfer(want).map_err(|e| FilterError::io("transferring chunk body", e))?;
        if moved == 0 {
            return Err(FilterError::unexpected_eof(format!("{remaining} more body bytes")));
        }
        remaining -= moved as u64;
    }
    Ok(())
}
