//! Protocol types shared by the decoding and encoding transducers
//!
//! - [`PayloadItem`]: a decoded chunk of payload data or the end-of-stream
//!   marker
//! - [`ParseError`]: failures while consuming a chunked stream
//! - [`SendError`]: failures while producing a chunked stream

mod error;
mod message;

pub use error::{ParseError, SendError};
pub use message::PayloadItem;
