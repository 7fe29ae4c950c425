use pipechunk_codec::protocol::ParseError;
use std::io;
use thiserror::Error;

/// A fatal filter failure.
///
/// Every variant aborts the filter; the recovery unit is the whole process,
/// restarted by whatever supervises the pipeline.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("framing error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("premature EOF expecting {expecting}")]
    UnexpectedEof { expecting: String },

    #[error("{context}: {source}")]
    Io { context: &'static str, source: io::Error },
}

impl FilterError {
    pub fn unexpected_eof<S: ToString>(expecting: S) -> Self {
        Self::UnexpectedEof { expecting: expecting.to_string() }
    }

    pub fn io(context: &'static str, source: io::Error) -> Self {
        Self::Io { context, source }
    }
}
