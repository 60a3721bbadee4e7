use shakmaty::{Bitboard, Color, Move, Piece, Role, Square};
use std::fmt;

/// How a position stands with respect to the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    /// 150 half-moves without a capture or pawn move.
    SeventyFiveMoves,
    /// The same position has occurred five times.
    FivefoldRepetition,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// True for every terminal status that is not a checkmate.
    pub fn is_draw(self) -> bool {
        self.is_terminal() && self != GameStatus::Checkmate
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::InsufficientMaterial => "insufficient material",
            GameStatus::SeventyFiveMoves => "seventy-five-move rule",
            GameStatus::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(text)
    }
}

/// Unicode chess glyph for a piece.
pub fn piece_glyph(piece: Piece) -> char {
    match (piece.role, piece.color) {
        (Role::King, Color::White) => '♔',
        (Role::Queen, Color::White) => '♕',
        (Role::Rook, Color::White) => '♖',
        (Role::Bishop, Color::White) => '♗',
        (Role::Knight, Color::White) => '♘',
        (Role::Pawn, Color::White) => '♙',
        (Role::King, Color::Black) => '♚',
        (Role::Queen, Color::Black) => '♛',
        (Role::Rook, Color::Black) => '♜',
        (Role::Bishop, Color::Black) => '♝',
        (Role::Knight, Color::Black) => '♞',
        (Role::Pawn, Color::Black) => '♟',
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: GameStatus,
    pub winner: Option<Color>,
}

impl Outcome {
    /// Derives the outcome of a terminal position. Returns `None` while the
    /// game is still running.
    pub fn of<B: BoardModel + ?Sized>(board: &B) -> Option<Self> {
        let status = board.status();
        match status {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate => Some(Outcome {
                status,
                winner: Some(!board.turn()),
            }),
            _ => Some(Outcome {
                status,
                winner: None,
            }),
        }
    }
}

/// The rules engine as seen by agents and the game driver.
///
/// Positions are mutated in place: `push` plays a move produced by
/// `legal_moves`, `pop` takes back the most recent one and restores the
/// exact previous state. Every other method is a read-only query.
/// `legal_moves` must enumerate in a stable order for a given position.
pub trait BoardModel {
    fn legal_moves(&self) -> Vec<Move>;

    /// Plays `mv`, which must come from `legal_moves()` of the current position.
    fn push(&mut self, mv: &Move);

    /// Takes back the last pushed move. Returns `None` if nothing was pushed.
    fn pop(&mut self) -> Option<Move>;

    fn turn(&self) -> Color;

    fn status(&self) -> GameStatus;

    fn is_check(&self) -> bool;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Squares attacked by the piece standing on `square` (empty if none).
    fn attacked_squares(&self, square: Square) -> Bitboard;

    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    fn is_checkmate(&self) -> bool {
        self.status() == GameStatus::Checkmate
    }
}
