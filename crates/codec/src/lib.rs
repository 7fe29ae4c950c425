//! A sans-I/O codec for chunked transfer encoding framing
//!
//! This crate implements the framing layer of HTTP/1.1-style chunked
//! transfer encoding as a pair of complementary transducers, without any
//! assumption about where the bytes come from or go to. It is the protocol
//! core of the `pipechunk` stream filters, and is equally usable on plain
//! in-memory buffers.
//!
//! # Wire format
//!
//! ```text
//! <hex-size>CRLF
//! <hex-size bytes of body>CRLF
//! ...
//! 0CRLF
//! ```
//!
//! The decoder accepts a bare LF wherever CRLF is accepted, hex digits in
//! either case, and size fields of any width that fits in a `u64`. The
//! encoder always emits CRLF terminators and minimal-width lowercase hex.
//! A zero-size chunk ends the stream at its own line terminator; nothing
//! follows it — in particular no trailer section, which distinguishes this
//! framing from a full RFC 7230 message body.
//!
//! # Architecture
//!
//! The crate is organized in two layers:
//!
//! - [`codec`]: the transducers themselves
//!   - [`codec::SizeLineDecoder`] and [`codec::TerminatorDecoder`]: explicit
//!     finite state machines consuming one byte per transition. These exist
//!     so a driver that must not read past the current token (because chunk
//!     bodies bypass its buffers entirely) can still reuse the parsing
//!     logic.
//!   - [`codec::ChunkedDecoder`] and [`codec::ChunkedEncoder`]: buffer-level
//!     transducers over [`bytes::BytesMut`] implementing the
//!     [`tokio_util::codec`] traits, built on the same state machines.
//! - [`protocol`]: the item and error types shared by both layers.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use pipechunk_codec::codec::ChunkedDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = ChunkedDecoder::new();
//! let mut buffer = BytesMut::from(&b"3\r\nabc\r\n0\r\n"[..]);
//!
//! let item = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(&item.as_bytes().unwrap()[..], b"abc");
//!
//! let item = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert!(item.is_eof());
//! ```

pub mod codec;
pub mod protocol;
