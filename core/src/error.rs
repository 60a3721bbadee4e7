//! Error types for board setup and the move wire format.

use std::io;
use thiserror::Error;

/// Errors raised while building or driving a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The FEN text could not be parsed.
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// The FEN parsed but describes an impossible position.
    #[error("illegal position {fen:?}: {reason}")]
    IllegalPosition { fen: String, reason: String },

    /// A move that is not legal in the current position.
    #[error("illegal move {uci} in the current position")]
    IllegalMove { uci: String },
}

/// Errors raised while encoding or decoding moves on the wire.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("I/O error on move stream: {0}")]
    Io(#[from] io::Error),

    /// The frame bytes are not valid UTF-8.
    #[error("move frame is not valid UTF-8: {frame:?}")]
    NotUtf8 { frame: Vec<u8> },

    /// The frame text is not a move in UCI notation.
    #[error("malformed move frame {text:?}")]
    Malformed { text: String },

    /// The notation does not fit in a single frame.
    #[error("move notation {text:?} does not fit in a frame")]
    Oversized { text: String },

    /// The stream closed in the middle of a frame.
    #[error("stream closed with {len} byte(s) of an incomplete frame buffered")]
    Truncated { len: usize },
}
