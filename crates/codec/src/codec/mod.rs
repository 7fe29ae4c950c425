//! The chunked transfer encoding transducers
//!
//! Two layers share one set of state machines:
//!
//! - [`SizeLineDecoder`] and [`TerminatorDecoder`] consume one byte per
//!   transition and never look ahead. A driver that moves chunk bodies
//!   outside its own buffers (e.g. through a kernel bulk transfer between
//!   descriptors) feeds these directly from single-byte reads, so no body
//!   byte is ever over-read into user memory.
//! - [`ChunkedDecoder`] and [`ChunkedEncoder`] operate on [`bytes::BytesMut`]
//!   via the [`tokio_util::codec`] traits for in-memory use.
//!
//! [`write_size_line`], [`LAST_CHUNK`] and [`MAX_CHUNK_SIZE`] define the
//! exact bytes of the produced framing and are shared with the stream
//! filter drivers.

mod chunked_decoder;
mod chunked_encoder;
mod size_line;
mod terminator;

pub use chunked_decoder::ChunkedDecoder;
pub use chunked_encoder::{ChunkedEncoder, LAST_CHUNK, MAX_CHUNK_SIZE, write_size_line};
pub use size_line::SizeLineDecoder;
pub use terminator::TerminatorDecoder;
