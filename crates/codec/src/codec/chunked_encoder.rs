//! Buffer-level encoder producing chunk-framed streams.

use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use std::io::Write;

use tokio_util::codec::Encoder;

/// Ceiling on a single declared chunk size.
///
/// A defensive bound on pathological availability reports, not a protocol
/// requirement; larger payloads continue in subsequent chunks.
pub const MAX_CHUNK_SIZE: usize = 0x7000_0000;

/// The final marker ending a chunked stream: a zero size line and nothing
/// after it. Exactly these three bytes, with no trailing CRLF.
pub const LAST_CHUNK: &[u8] = b"0\r\n";

/// Writes a chunk-size line for `len`: minimal-width lowercase hex
/// followed by CRLF.
pub fn write_size_line(dst: &mut BytesMut, len: usize) {
    // infallible: Writer only appends to the BytesMut
    let _ = write!(helper::Writer(dst), "{len:x}\r\n");
}

/// An encoder for chunk-framed byte streams.
///
/// Each [`PayloadItem::Chunk`] becomes one chunk on the wire; the first
/// [`PayloadItem::Eof`] emits [`LAST_CHUNK`] and makes the encoder inert.
/// Empty chunks are skipped, since a zero size line would terminate the
/// stream early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedEncoder {
    eof: bool,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self { eof: false }
    }
}

impl Default for ChunkedEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.eof {
            return Ok(());
        }

        match item {
            PayloadItem::Chunk(bytes) => {
                if bytes.remaining() == 0 {
                    return Ok(());
                }
                write_size_line(dst, bytes.remaining());
                dst.reserve(bytes.remaining() + 2);
                dst.extend_from_slice(bytes.chunk());
                dst.extend_from_slice(b"\r\n");
                Ok(())
            }
            PayloadItem::Eof => {
                self.eof = true;
                dst.extend_from_slice(LAST_CHUNK);
                Ok(())
            }
        }
    }
}

mod helper {
    use bytes::{BufMut, BytesMut};
    use std::io;

    pub struct Writer<'a>(pub &'a mut BytesMut);

    impl io::Write for Writer<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.put_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ChunkedDecoder;
    use bytes::Bytes;
    use tokio_util::codec::Decoder;

    #[test]
    fn test_single_chunk_then_eof() {
        let mut encoder = ChunkedEncoder::new();
        let mut buffer = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"abc")), &mut buffer).unwrap();
        encoder.encode(PayloadItem::<Bytes>::Eof, &mut buffer).unwrap();

        assert_eq!(&buffer[..], b"3\r\nabc\r\n0\r\n");
    }

    #[test]
    fn test_empty_stream_is_final_marker_only() {
        let mut encoder = ChunkedEncoder::new();
        let mut buffer = BytesMut::new();

        encoder.encode(PayloadItem::<Bytes>::Eof, &mut buffer).unwrap();

        assert_eq!(&buffer[..], LAST_CHUNK);
    }

    #[test]
    fn test_hex_is_lowercase_minimal_width() {
        let mut encoder = ChunkedEncoder::new();
        let mut buffer = BytesMut::new();

        let body = vec![b'x'; 255];
        encoder.encode(PayloadItem::Chunk(Bytes::from(body)), &mut buffer).unwrap();

        assert!(buffer.starts_with(b"ff\r\n"));
    }

    #[test]
    fn test_empty_chunk_is_skipped() {
        let mut encoder = ChunkedEncoder::new();
        let mut buffer = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(Bytes::new()), &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_encoder_is_inert_after_eof() {
        let mut encoder = ChunkedEncoder::new();
        let mut buffer = BytesMut::new();

        encoder.encode(PayloadItem::<Bytes>::Eof, &mut buffer).unwrap();
        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"late")), &mut buffer).unwrap();

        assert_eq!(&buffer[..], LAST_CHUNK);
    }

    #[test]
    fn test_size_line_format() {
        let mut line = BytesMut::new();
        write_size_line(&mut line, 0x70000000);
        assert_eq!(&line[..], b"70000000\r\n");
    }

    #[test]
    fn test_round_trip() {
        let pieces: &[&[u8]] = &[b"hello", b", ", b"world", b"!"];

        let mut encoder = ChunkedEncoder::new();
        let mut wire = BytesMut::new();
        for piece in pieces {
            encoder.encode(PayloadItem::Chunk(Bytes::copy_from_slice(piece)), &mut wire).unwrap();
        }
        encoder.encode(PayloadItem::<Bytes>::Eof, &mut wire).unwrap();

        let mut decoder = ChunkedDecoder::new();
        let mut decoded = Vec::new();
        loop {
            match decoder.decode(&mut wire).unwrap().unwrap() {
                PayloadItem::Chunk(bytes) => decoded.extend_from_slice(&bytes),
                PayloadItem::Eof => break,
            }
        }

        assert_eq!(decoded, b"hello, world!");
        assert!(wire.is_empty());
    }
}
