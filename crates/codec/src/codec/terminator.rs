//! Byte-at-a-time parser for the line terminator after a chunk body.
//!
//! Accepts either CRLF or a bare LF. A CR followed by anything other than
//! LF is a hard error; lone CR is never treated as a terminator.

use crate::protocol::ParseError;

/// Parser state for one body terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminatorDecoder {
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first byte; CR or LF is legal
    Crlf,
    /// CR seen; only LF is legal
    Lf,
    /// Terminator complete
    Done,
}

impl TerminatorDecoder {
    /// Creates a parser positioned before the terminator.
    pub fn new() -> Self {
        Self { state: State::Crlf }
    }

    /// Advances the machine by one byte.
    ///
    /// # Returns
    /// - `Ok(false)` when the terminator is not yet complete
    /// - `Ok(true)` once LF has been consumed (idempotent afterwards)
    /// - `Err(ParseError)` on any byte that is neither CR nor LF where
    ///   one is required
    pub fn feed(&mut self, byte: u8) -> Result<bool, ParseError> {
        match self.state {
            State::Crlf => match byte {
                b'\r' => {
                    self.state = State::Lf;
                    Ok(false)
                }
                b'\n' => {
                    self.state = State::Done;
                    Ok(true)
                }
                _ => Err(ParseError::invalid_byte(byte, self.expecting())),
            },

            State::Lf => match byte {
                b'\n' => {
                    self.state = State::Done;
                    Ok(true)
                }
                _ => Err(ParseError::invalid_byte(byte, self.expecting())),
            },

            State::Done => Ok(true),
        }
    }

    /// Names the token class the machine is waiting for, for diagnostics.
    pub fn expecting(&self) -> &'static str {
        match self.state {
            State::Crlf => "CRLF",
            State::Lf => "LF",
            State::Done => "nothing",
        }
    }
}

impl Default for TerminatorDecoder {
    fn default() -> Self {
        Self::new()
    }
}
