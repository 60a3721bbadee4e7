//! The shakmaty-backed board used by the driver, the agents and the renderer.

use crate::board::{BoardModel, GameStatus};
use crate::error::BoardError;
use shakmaty::uci::UciMove as Uci;
use shakmaty::{Bitboard, Board, Chess, Color, Move, Piece, Position, Square};

/// Half-moves without progress after which the game is drawn automatically.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position that draw the game automatically.
const FIVEFOLD: usize = 5;

/// Position plus the history needed to take moves back.
///
/// `push` stores a copy of the current position before playing, so `pop`
/// restores the previous state exactly (castling rights, en passant and
/// move clocks included).
#[derive(Clone, Debug, Default)]
pub struct GameBoard {
    position: Chess,
    history: Vec<(Chess, Move)>,
}

impl GameBoard {
    /// Creates a new game in the starting position.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Chess) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    /// The current position.
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Moves pushed since construction, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.iter().map(|(_, mv)| mv)
    }

    /// Number of half-moves pushed since construction.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Full move number of the current position.
    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    /// Resolves UCI notation against the current position and plays it.
    pub fn push_uci(&mut self, uci: &Uci) -> Result<Move, BoardError> {
        let mv = uci
            .to_move(&self.position)
            .map_err(|_| BoardError::IllegalMove {
                uci: uci.to_string(),
            })?;
        self.push(&mv);
        Ok(mv)
    }

    fn is_fivefold_repetition(&self) -> bool {
        // Only positions since the last irreversible move can repeat.
        let reversible = self.position.halfmoves() as usize;
        if reversible < 2 * (FIVEFOLD - 1) {
            return false;
        }

        let occurrences = self
            .history
            .iter()
            .rev()
            .take(reversible)
            .filter(|(earlier, _)| same_position(earlier, &self.position))
            .count();

        occurrences + 1 >= FIVEFOLD
    }
}

/// Repetition identity: placement, side to move, castling rights and the
/// en passant captures actually available.
fn same_position(a: &Chess, b: &Chess) -> bool {
    if a.turn() != b.turn()
        || a.board() != b.board()
        || a.castles().castling_rights() != b.castles().castling_rights()
    {
        return false;
    }
    en_passant_targets(a) == en_passant_targets(b)
}

fn en_passant_targets(position: &Chess) -> Vec<Square> {
    position
        .legal_moves()
        .iter()
        .filter(|mv| mv.is_en_passant())
        .map(|mv| mv.to())
        .collect()
}

impl BoardModel for GameBoard {
    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    fn push(&mut self, mv: &Move) {
        let previous = self.position.clone();
        self.position.play_unchecked(*mv);
        self.history.push((previous, mv.clone()));
    }

    fn pop(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.position = previous;
        Some(mv)
    }

    fn turn(&self) -> Color {
        self.position.turn()
    }

    fn status(&self) -> GameStatus {
        if self.position.is_checkmate() {
            GameStatus::Checkmate
        } else if self.position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if self.position.is_stalemate() {
            GameStatus::Stalemate
        } else if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            GameStatus::SeventyFiveMoves
        } else if self.is_fivefold_repetition() {
            GameStatus::FivefoldRepetition
        } else {
            GameStatus::Ongoing
        }
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board().piece_at(square)
    }

    fn attacked_squares(&self, square: Square) -> Bitboard {
        self.board().attacks_from(square)
    }
}

impl GameBoard {
    fn board(&self) -> &Board {
        self.position.board()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::positions;

    fn play(board: &mut GameBoard, moves: &[&str]) {
        for text in moves {
            let uci: Uci = text.parse().unwrap();
            board.push_uci(&uci).unwrap();
        }
    }

    #[test]
    fn test_push_pop_restores_position() {
        let mut board = GameBoard::from_fen(positions::KIWIPETE).unwrap();
        let before = board.clone();

        for mv in board.legal_moves() {
            board.push(&mv);
            assert_ne!(board.turn(), before.turn());
            assert_eq!(board.pop(), Some(mv));

            assert_eq!(board.position().board(), before.position().board());
            assert_eq!(board.turn(), before.turn());
            assert_eq!(board.legal_moves(), before.legal_moves());
        }
    }

    #[test]
    fn test_pop_on_fresh_board() {
        let mut board = GameBoard::new();
        assert_eq!(board.pop(), None);
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_push_uci_rejects_illegal_move() {
        let mut board = GameBoard::new();
        let uci: Uci = "e2e5".parse().unwrap();
        assert_eq!(
            board.push_uci(&uci),
            Err(BoardError::IllegalMove {
                uci: "e2e5".to_string()
            })
        );
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_checkmate_status() {
        let board = GameBoard::from_fen(positions::FOOLS_MATE).unwrap();
        assert_eq!(board.status(), GameStatus::Checkmate);
        assert!(board.is_checkmate());
        assert!(board.is_check());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_stalemate_status() {
        let board = GameBoard::from_fen(positions::STALEMATE).unwrap();
        assert_eq!(board.status(), GameStatus::Stalemate);
        assert!(!board.is_check());
        assert!(board.status().is_draw());
    }

    #[test]
    fn test_insufficient_material_status() {
        let board = GameBoard::from_fen(positions::BARE_KINGS).unwrap();
        assert_eq!(board.status(), GameStatus::InsufficientMaterial);

        let knight = GameBoard::from_fen("8/8/4k3/8/8/3K4/3N4/8 w - - 0 1").unwrap();
        assert_eq!(knight.status(), GameStatus::InsufficientMaterial);

        let rook = GameBoard::from_fen("8/8/4k3/8/8/3K4/3R4/8 w - - 0 1").unwrap();
        assert_eq!(rook.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_insufficient_material_outranks_stalemate() {
        // Black king h8 has no move: g8 is a defended bishop, g7 and h7 are
        // covered. Only a king and bishop remain.
        let board = GameBoard::from_fen("6Bk/5K2/8/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(board.legal_moves().is_empty());
        assert!(!board.is_check());
        assert_eq!(board.status(), GameStatus::InsufficientMaterial);
        assert!(board.status().is_draw());
    }

    #[test]
    fn test_seventy_five_move_rule() {
        let board = GameBoard::from_fen("8/8/4k3/8/8/3K4/3R4/8 w - - 150 100").unwrap();
        assert_eq!(board.status(), GameStatus::SeventyFiveMoves);

        let board = GameBoard::from_fen("8/8/4k3/8/8/3K4/3R4/8 w - - 149 100").unwrap();
        assert_eq!(board.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_fivefold_repetition() {
        let mut board = GameBoard::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

        for _ in 0..3 {
            play(&mut board, &shuffle);
        }
        // Start position seen four times.
        assert_eq!(board.status(), GameStatus::Ongoing);

        play(&mut board, &shuffle);
        assert_eq!(board.status(), GameStatus::FivefoldRepetition);

        board.pop();
        assert_eq!(board.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_outcome() {
        let mated = GameBoard::from_fen(positions::FOOLS_MATE).unwrap();
        let outcome = crate::board::Outcome::of(&mated).unwrap();
        assert_eq!(outcome.winner, Some(Color::Black));

        let drawn = GameBoard::from_fen(positions::STALEMATE).unwrap();
        let outcome = crate::board::Outcome::of(&drawn).unwrap();
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.status, GameStatus::Stalemate);

        assert!(crate::board::Outcome::of(&GameBoard::new()).is_none());
    }

    #[test]
    fn test_attacked_squares() {
        let board = GameBoard::new();
        // Knight on b1 covers a3, c3 and d2.
        assert_eq!(board.attacked_squares(Square::B1).count(), 3);
        assert!(board.attacked_squares(Square::B1).contains(Square::C3));
        assert!(board.attacked_squares(Square::E4).is_empty());
    }
}
