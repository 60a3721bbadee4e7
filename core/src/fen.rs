use crate::error::BoardError;
use crate::game_state::GameBoard;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess};

impl GameBoard {
    /// Builds a board from a FEN string. The history starts empty, so
    /// repetitions are only counted from this position on.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed: Fen = fen.trim().parse().map_err(|e| BoardError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })?;

        let position: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| BoardError::IllegalPosition {
                    fen: fen.to_string(),
                    reason: format!("{e}"),
                })?;

        Ok(GameBoard::from_position(position))
    }
}

/// Standard FEN positions for testing.
pub mod positions {
    /// Starting position.
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Kiwipete position - good for testing complex positions.
    pub const KIWIPETE: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    /// Position after 1.e4 e5.
    pub const AFTER_E4_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";

    /// White to move, Qxf7 is mate.
    pub const SCHOLARS_MATE_IN_ONE: &str =
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

    /// Black to move, Qh4 is mate.
    pub const FOOLS_MATE_IN_ONE: &str =
        "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2";

    /// White is checkmated (after 1.f3 e5 2.g4 Qh4#).
    pub const FOOLS_MATE: &str =
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    /// Black to move and stalemated.
    pub const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

    /// Bare kings.
    pub const BARE_KINGS: &str = "8/8/4k3/8/8/3K4/8/8 w - - 0 1";

    /// White pawn on the seventh rank, ready to promote.
    pub const PROMOTION: &str = "8/4P2k/8/8/8/8/8/4K3 w - - 0 1";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardModel, GameStatus};
    use shakmaty::{Color, Role, Square};

    #[test]
    fn test_parse_starting_position() {
        let board = GameBoard::from_fen(positions::STARTING).unwrap();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_parse_kiwipete() {
        let board = GameBoard::from_fen(positions::KIWIPETE).unwrap();
        assert_eq!(board.turn(), Color::White);

        let piece = board.piece_at(Square::E1).unwrap();
        assert_eq!(piece.role, Role::King);
        assert_eq!(piece.color, Color::White);
        assert_eq!(board.legal_moves().len(), 48);
    }

    #[test]
    fn test_parse_en_passant() {
        let board = GameBoard::from_fen(positions::AFTER_E4_E5).unwrap();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.legal_moves().len(), 29);
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(
            GameBoard::from_fen("invalid"),
            Err(BoardError::InvalidFen { .. })
        ));
        assert!(GameBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1")
            .is_err());
    }

    #[test]
    fn test_illegal_position() {
        // Three white kings.
        let result = GameBoard::from_fen("8/8/4k3/8/8/3K4/2KK4/8 w - - 0 1");
        assert!(matches!(result, Err(BoardError::IllegalPosition { .. })));
    }
}
