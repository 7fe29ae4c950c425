use std::io;
use thiserror::Error;

/// Errors raised while consuming a chunked stream.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("illegal byte {byte:#04x}, expecting {expecting}")]
    InvalidByte { byte: u8, expecting: &'static str },

    #[error("chunk size exceeds the representable maximum")]
    ChunkSizeTooLarge,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_byte(byte: u8, expecting: &'static str) -> Self {
        Self::InvalidByte { byte, expecting }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Errors raised while producing a chunked stream.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
