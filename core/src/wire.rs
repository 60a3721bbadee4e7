//! Fixed-width move frames for the renderer connection.
//!
//! Every move travels as its UCI notation (`e2e4`, `e7e8q`, castling as the
//! king move `e1g1`) in ASCII, right-padded with [`PADDING`] to exactly
//! [`FRAME_LEN`] bytes. Frames follow each other with no delimiter and the
//! stream carries no end marker: the sender closing the connection ends
//! the game.

use crate::error::WireError;
use shakmaty::uci::UciMove as Uci;
use shakmaty::Move;
use std::io::{self, Read, Write};
use tracing::trace;

/// Bytes per encoded move.
pub const FRAME_LEN: usize = 6;

/// Filler byte after the notation.
pub const PADDING: u8 = 0;

/// Encodes a move into one frame.
pub fn encode(mv: &Move) -> Result<[u8; FRAME_LEN], WireError> {
    encode_uci(&Uci::from_standard(*mv))
}

/// Encodes UCI notation into one frame.
pub fn encode_uci(uci: &Uci) -> Result<[u8; FRAME_LEN], WireError> {
    let text = uci.to_string();
    let bytes = text.as_bytes();
    if bytes.len() > FRAME_LEN {
        return Err(WireError::Oversized { text });
    }

    let mut frame = [PADDING; FRAME_LEN];
    frame[..bytes.len()].copy_from_slice(bytes);
    Ok(frame)
}

/// Decodes one frame into UCI notation, stripping trailing padding.
///
/// The result still has to be resolved against a position to become a
/// legal [`Move`].
pub fn decode(frame: &[u8; FRAME_LEN]) -> Result<Uci, WireError> {
    let text = std::str::from_utf8(frame).map_err(|_| WireError::NotUtf8 {
        frame: frame.to_vec(),
    })?;
    let text = text.trim_end_matches(|c: char| c == char::from(PADDING) || c.is_ascii_whitespace());

    text.parse::<Uci>().map_err(|_| WireError::Malformed {
        text: text.to_string(),
    })
}

/// Writes move frames to a stream.
pub struct MoveWriter<W: Write> {
    inner: W,
}

impl<W: Write> MoveWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Sends one move and flushes it.
    pub fn send(&mut self, mv: &Move) -> Result<(), WireError> {
        let frame = encode(mv)?;
        self.inner.write_all(&frame)?;
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads move frames from a stream, buffering partial reads.
pub struct MoveReader<R: Read> {
    inner: R,
    buffer: Vec<u8>,
}

impl<R: Read> MoveReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(FRAME_LEN * 4),
        }
    }

    /// Blocks until a full frame is buffered and returns the decoded move.
    ///
    /// Returns `Ok(None)` once the peer has closed the stream on a frame
    /// boundary. A close in the middle of a frame is an error.
    pub fn read_move(&mut self) -> Result<Option<Uci>, WireError> {
        let mut chunk = [0u8; FRAME_LEN * 4];

        while self.buffer.len() < FRAME_LEN {
            match self.inner.read(&mut chunk) {
                Ok(0) if self.buffer.is_empty() => return Ok(None),
                Ok(0) => {
                    return Err(WireError::Truncated {
                        len: self.buffer.len(),
                    })
                }
                Ok(n) => {
                    trace!(bytes = n, "move stream read");
                    self.buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let mut frame = [0u8; FRAME_LEN];
        frame.copy_from_slice(&self.buffer[..FRAME_LEN]);
        self.buffer.drain(..FRAME_LEN);

        decode(&frame).map(Some)
    }

    /// Bytes received but not yet decoded.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardModel;
    use crate::fen::positions;
    use crate::game_state::GameBoard;
    use std::io::Cursor;

    /// Hands out its data a few bytes at a time.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn assert_round_trip(board: &GameBoard) {
        for mv in board.legal_moves() {
            let frame = encode(&mv).unwrap();
            let uci = decode(&frame).unwrap();
            assert_eq!(uci.to_move(board.position()).unwrap(), mv);
        }
    }

    #[test]
    fn test_encode_pads_to_frame() {
        let uci: Uci = "e2e4".parse().unwrap();
        assert_eq!(&encode_uci(&uci).unwrap(), b"e2e4\0\0");

        let uci: Uci = "e7e8q".parse().unwrap();
        assert_eq!(&encode_uci(&uci).unwrap(), b"e7e8q\0");
    }

    #[test]
    fn test_decode_strips_padding() {
        assert_eq!(decode(b"e2e4\0\0").unwrap().to_string(), "e2e4");
        assert_eq!(decode(b"g1f3  ").unwrap().to_string(), "g1f3");
        assert_eq!(decode(b"a7a8n\0").unwrap().to_string(), "a7a8n");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(b"hello!"), Err(WireError::Malformed { .. })));
        assert!(matches!(decode(b"\0\0\0\0\0\0"), Err(WireError::Malformed { .. })));
        assert!(matches!(
            decode(&[0xff, 0xfe, b'e', b'4', 0, 0]),
            Err(WireError::NotUtf8 { .. })
        ));
    }

    #[test]
    fn test_round_trip_all_legal_moves() {
        assert_round_trip(&GameBoard::new());
        // Castling both ways, en passant-free middlegame.
        assert_round_trip(&GameBoard::from_fen(positions::KIWIPETE).unwrap());
        // En passant capture available.
        assert_round_trip(
            &GameBoard::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap(),
        );
        // Underpromotions.
        assert_round_trip(&GameBoard::from_fen(positions::PROMOTION).unwrap());
    }

    #[test]
    fn test_reader_handles_split_frames() {
        let mut board = GameBoard::new();
        let mut data = Vec::new();
        for text in ["e2e4", "e7e5", "g1f3"] {
            let uci: Uci = text.parse().unwrap();
            let mv = board.push_uci(&uci).unwrap();
            data.extend_from_slice(&encode(&mv).unwrap());
        }

        let mut reader = MoveReader::new(Trickle {
            data,
            pos: 0,
            step: 4,
        });

        let mut seen = Vec::new();
        while let Some(uci) = reader.read_move().unwrap() {
            seen.push(uci.to_string());
        }
        assert_eq!(seen, ["e2e4", "e7e5", "g1f3"]);
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn test_reader_reports_truncated_frame() {
        let mut reader = MoveReader::new(Cursor::new(b"e2e4\0\0e7e".to_vec()));
        assert_eq!(reader.read_move().unwrap().unwrap().to_string(), "e2e4");
        assert!(matches!(
            reader.read_move(),
            Err(WireError::Truncated { len: 3 })
        ));
    }

    #[test]
    fn test_writer_reader_over_buffer() {
        let board = GameBoard::from_fen(positions::PROMOTION).unwrap();
        let mut writer = MoveWriter::new(Vec::new());
        for mv in board.legal_moves() {
            writer.send(&mv).unwrap();
        }
        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), board.legal_moves().len() * FRAME_LEN);

        let mut reader = MoveReader::new(Cursor::new(bytes));
        for mv in board.legal_moves() {
            let uci = reader.read_move().unwrap().unwrap();
            assert_eq!(uci.to_move(board.position()).unwrap(), mv);
        }
        assert!(reader.read_move().unwrap().is_none());
    }
}
