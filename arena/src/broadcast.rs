//! Forwards committed moves to a renderer without ever stalling the game.
//!
//! The driver publishes into an unbounded channel; a writer thread owns the
//! stream and sends one frame per move. Closing the channel lets the writer
//! drain what is queued, then the stream is dropped, which is how the
//! renderer learns the game has ended.

use arena_core::{Move, MoveWriter, Uci};
use crossbeam_channel::{unbounded, Sender};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

pub struct Broadcaster {
    tx: Option<Sender<Move>>,
    writer: Option<JoinHandle<usize>>,
}

impl Broadcaster {
    /// Connects to a listening renderer.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        info!(peer = ?stream.peer_addr().ok(), "renderer connected");
        Ok(Self::spawn(stream))
    }

    /// Starts the writer thread over any byte sink.
    pub fn spawn<W: Write + Send + 'static>(sink: W) -> Self {
        let (tx, rx) = unbounded::<Move>();

        let writer = thread::spawn(move || {
            let mut writer = MoveWriter::new(sink);
            let mut sent = 0;
            for mv in rx {
                if let Err(e) = writer.send(&mv) {
                    warn!(
                        error = %e,
                        mv = %Uci::from_standard(mv),
                        "move stream broken, dropping further moves"
                    );
                    break;
                }
                sent += 1;
            }
            debug!(sent, "move stream closed");
            sent
        });

        Self {
            tx: Some(tx),
            writer: Some(writer),
        }
    }

    /// Queues a move. Never blocks; moves published after the stream broke
    /// are discarded.
    pub fn publish(&self, mv: &Move) {
        if let Some(tx) = &self.tx {
            if tx.send(mv.clone()).is_err() {
                debug!("writer gone, move dropped");
            }
        }
    }

    /// Closes the channel, waits for queued moves to be written and closes
    /// the stream. Returns how many moves reached the stream.
    pub fn finish(mut self) -> usize {
        self.close()
    }

    fn close(&mut self) -> usize {
        drop(self.tx.take());
        match self.writer.take().map(JoinHandle::join) {
            Some(Ok(sent)) => sent,
            Some(Err(_)) => {
                warn!("move writer panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for Broadcaster {
    fn drop(&mut self) {
        self.close();
    }
}
