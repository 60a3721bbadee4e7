//! Network side of the renderer: blocking reads on a dedicated thread,
//! decoded moves handed to the display through a bounded queue.

use arena_core::{MoveReader, Uci, WireError};
use crossbeam_channel::{bounded, Receiver};
use std::io::Read;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Moves buffered between the reader thread and the display.
pub const QUEUE_CAPACITY: usize = 64;

#[derive(Debug)]
pub enum StreamEvent {
    Move(Uci),
    /// The driver closed the stream on a frame boundary.
    Closed,
    /// Unreadable input; nothing follows.
    Failed(WireError),
}

/// Reads frames from `stream` until it ends or breaks. The last event sent
/// is always `Closed` or `Failed`, unless the display hung up first.
pub fn spawn<R: Read + Send + 'static>(stream: R) -> (Receiver<StreamEvent>, JoinHandle<()>) {
    let (tx, rx) = bounded(QUEUE_CAPACITY);

    let handle = thread::spawn(move || {
        let mut reader = MoveReader::new(stream);
        loop {
            let event = match reader.read_move() {
                Ok(Some(uci)) => StreamEvent::Move(uci),
                Ok(None) => {
                    info!("driver closed the stream");
                    StreamEvent::Closed
                }
                Err(e) => StreamEvent::Failed(e),
            };

            let last = !matches!(event, StreamEvent::Move(_));
            if tx.send(event).is_err() {
                debug!("display gone, reader stopping");
                break;
            }
            if last {
                break;
            }
        }
    });

    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(bytes: &[u8]) -> Vec<StreamEvent> {
        let (rx, handle) = spawn(Cursor::new(bytes.to_vec()));
        handle.join().unwrap();
        rx.try_iter().collect()
    }

    #[test]
    fn test_moves_then_closed() {
        let events = collect(b"e2e4\0\0e7e5\0\0e1g1\0\0");
        assert_eq!(events.len(), 4);
        let moves: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                StreamEvent::Move(uci) => Some(uci.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(moves, ["e2e4", "e7e5", "e1g1"]);
        assert!(matches!(events[3], StreamEvent::Closed));
    }

    #[test]
    fn test_malformed_frame_stops_reader() {
        let events = collect(b"e2e4\0\0zzzzzze7e5\0\0");
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], StreamEvent::Move(_)));
        assert!(matches!(events[1], StreamEvent::Failed(WireError::Malformed { .. })));
    }

    #[test]
    fn test_truncated_stream_fails() {
        let events = collect(b"e2e4\0\0e7");
        assert!(matches!(events[1], StreamEvent::Failed(WireError::Truncated { len: 2 })));
    }

    #[test]
    fn test_reader_stops_when_display_hangs_up() {
        let frames: Vec<u8> = b"e2e4\0\0".repeat(QUEUE_CAPACITY * 2);
        let (rx, handle) = spawn(Cursor::new(frames));
        drop(rx);
        handle.join().unwrap();
    }
}
