//! The encoder driver: raw input, chunk-framed output.

use std::cmp;

use bytes::BytesMut;
use pipechunk_codec::codec::{LAST_CHUNK, MAX_CHUNK_SIZE, write_size_line};
use tracing::trace;

use crate::channel::Channel;
use crate::error::FilterError;

/// Wraps the channel's source byte stream into chunk-framed output on its
/// sink.
///
/// Chunk boundaries are opportunistic: each iteration blocks until the
/// source is readable, asks how many bytes are queued, and frames exactly
/// that many (clamped to [`MAX_CHUNK_SIZE`]) — no buffering, no artificial
/// latency, at the price of many small chunks under slow-trickle input.
/// Zero bytes available after a readiness wait is end of input, upon which
/// the three-byte final marker is written and the filter exits.
///
/// # Errors
/// Fails on any underlying I/O failure, and on a zero-progress transfer
/// for a body the availability query promised.
pub fn chunk<C: Channel>(channel: &mut C) -> Result<(), FilterError> {
    chunk_with_ceiling(channel, MAX_CHUNK_SIZE)
}

/// [`chunk`] with an explicit ceiling on the declared chunk size.
///
/// `ceiling` must be at least 1. Exposed so the clamp-and-continue
/// behavior can be exercised without gigabyte inputs.
pub fn chunk_with_ceiling<C: Channel>(channel: &mut C, ceiling: usize) -> Result<(), FilterError> {
    debug_assert!(ceiling > 0);

    let mut size_line = BytesMut::with_capacity(18);
    loop {
        channel.wait_readable().map_err(|e| FilterError::io("waiting for input", e))?;

        let available = channel.available().map_err(|e| FilterError::io("querying available input", e))?;
        if available == 0 {
            // readable with nothing queued: the source reached end of input
            break;
        }

        let len = cmp::min(available, ceiling);
        trace!(len, "emitting chunk");

        size_line.clear();
        write_size_line(&mut size_line, len);
        channel.write_all(&size_line).map_err(|e| FilterError::io("writing chunk size", e))?;

        let mut remaining = len;
        while remaining > 0 {
            let moved = channel.transfer(remaining).map_err(|e| FilterError::io("transferring chunk body", e))?;
            if moved == 0 {
                return Err(FilterError::unexpected_eof(format!("{remaining} more body bytes")));
            }
            remaining -= moved;
        }

        channel.write_all(b"\r\n").map_err(|e| FilterError::io("writing chunk terminator", e))?;
    }

    channel.write_all(LAST_CHUNK).map_err(|e| FilterError::io("writing final chunk", e))?;
    Ok(())
}
