use crate::reader::StreamEvent;
use arena_core::{color_name, piece_glyph, BoardModel, GameBoard, Move, Outcome, Square, Uci};
use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use std::io::{self, Write};
use tracing::{error, info};

/// Where the connection to the driver stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    Live,
    /// Stream ended normally.
    Ended,
    /// Bad input; the connection was dropped.
    Failed(String),
}

/// What the event loop must do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop reading and shut the connection down.
    Close,
}

pub struct View {
    board: GameBoard,
    last_move: Option<Move>,
    link: Link,
}

impl View {
    pub fn new() -> Self {
        Self {
            board: GameBoard::new(),
            last_move: None,
            link: Link::Live,
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Applies one event from the reader. Moves must be legal on the
    /// renderer's own board; anything else fails closed.
    pub fn on_event(&mut self, event: StreamEvent) -> Flow {
        if self.link != Link::Live {
            return Flow::Close;
        }

        match event {
            StreamEvent::Move(uci) => self.apply(&uci),
            StreamEvent::Closed => {
                self.link = Link::Ended;
                Flow::Close
            }
            StreamEvent::Failed(e) => {
                error!(error = %e, "unreadable move stream");
                self.link = Link::Failed(e.to_string());
                Flow::Close
            }
        }
    }

    fn apply(&mut self, uci: &Uci) -> Flow {
        match self.board.push_uci(uci) {
            Ok(mv) => {
                info!(ply = self.board.ply(), mv = %uci, "move received");
                self.last_move = Some(mv);
                Flow::Continue
            }
            Err(e) => {
                error!(error = %e, ply = self.board.ply(), "rejecting move stream");
                self.link = Link::Failed(e.to_string());
                Flow::Close
            }
        }
    }

    fn highlighted(&self, square: Square) -> bool {
        self.last_move
            .as_ref()
            .is_some_and(|mv| mv.to() == square || mv.from() == Some(square))
    }

    fn status_line(&self) -> String {
        match (&self.link, Outcome::of(&self.board)) {
            (Link::Failed(reason), _) => format!("Connection dropped: {reason}"),
            (_, Some(outcome)) => match outcome.winner {
                Some(winner) => format!("{} ({} wins)", outcome.status, color_name(winner)),
                None => format!("Draw by {}", outcome.status),
            },
            (Link::Ended, None) => "Game ended".to_string(),
            (Link::Live, None) if self.board.is_check() => {
                format!("{} to move | Check!", color_name(self.board.turn()))
            }
            (Link::Live, None) => format!("{} to move", color_name(self.board.turn())),
        }
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.queue(MoveTo(0, 0))?;
        out.queue(Clear(ClearType::All))?;
        out.queue(Print("Chess arena - live board (q to quit)\r\n\r\n"))?;
        out.queue(Print("   a b c d e f g h\r\n"))?;
        out.queue(Print(" ┌─────────────────┐\r\n"))?;

        for rank in (0..8u32).rev() {
            out.queue(Print(format!("{}│ ", rank + 1)))?;

            for file in 0..8u32 {
                let square = Square::new(rank * 8 + file);

                let background = if self.highlighted(square) {
                    TermColor::DarkYellow
                } else if (file + rank) % 2 == 0 {
                    TermColor::DarkGrey
                } else {
                    TermColor::Black
                };
                out.queue(SetBackgroundColor(background))?;

                match self.board.piece_at(square) {
                    Some(piece) => {
                        let foreground = match piece.color {
                            arena_core::Color::White => TermColor::White,
                            arena_core::Color::Black => TermColor::Magenta,
                        };
                        out.queue(SetForegroundColor(foreground))?;
                        out.queue(Print(format!("{} ", piece_glyph(piece))))?;
                    }
                    None => {
                        out.queue(Print("  "))?;
                    }
                }
                out.queue(ResetColor)?;
            }

            out.queue(Print(format!("│{}\r\n", rank + 1)))?;
        }

        out.queue(Print(" └─────────────────┘\r\n"))?;
        out.queue(Print("   a b c d e f g h\r\n\r\n"))?;

        let last = self
            .last_move
            .as_ref()
            .map(|mv| Uci::from_standard(*mv).to_string())
            .unwrap_or_else(|| "-".to_string());
        out.queue(Print(format!(
            "Move {} | last: {}\r\n",
            self.board.fullmove_number(),
            last
        )))?;
        out.queue(Print(format!("{}\r\n", self.status_line())))?;

        out.flush()
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}
