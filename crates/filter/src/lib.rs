//! Chunked transfer encoding stream filters
//!
//! This crate provides the two `pipechunk` executables and the driver logic
//! behind them:
//!
//! - `dechunk`: strips chunk framing from stdin and forwards only the
//!   payload bytes to stdout, exiting once the zero-size chunk has been
//!   consumed.
//! - `chunk`: wraps the stdin byte stream into chunk-framed output on
//!   stdout, sizing each chunk by however much input the kernel has queued
//!   at the moment of the check, and ending with the zero-size marker at
//!   end of input.
//!
//! Both are single-threaded blocking pipeline stages. Chunk bodies move
//! from source to sink through [`Channel::transfer`], which is `splice(2)`
//! on descriptor pairs that support it and an ordinary buffer copy
//! otherwise — the bytes on the wire are identical either way. Framing
//! bytes (size lines and terminators) are read one byte at a time so that
//! no body byte is ever pulled into a user-space buffer by accident.
//!
//! The drivers [`dechunk()`] and [`chunk()`] are generic over [`Channel`], so
//! the whole protocol loop runs against in-memory endpoints in tests; only
//! [`channel::FdChannel`] touches the operating system.
//!
//! On any framing violation, premature end of input, or I/O failure the
//! driver returns a [`FilterError`]; the binaries log it to stderr and exit
//! with status 1. Output already written is never retracted.

pub mod channel;

mod chunk;
mod dechunk;
mod error;

pub use channel::Channel;
pub use chunk::{chunk, chunk_with_ceiling};
pub use dechunk::dechunk;
pub use error::FilterError;

#[cfg(test)]
pub(crate) mod testing;
