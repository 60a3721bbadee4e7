use crate::board::BoardModel;
use shakmaty::Move;

/// Counts leaf nodes of the legal move tree to the given depth.
///
/// Walks the tree with push/pop on a single board, so it doubles as a check
/// that every pushed move is taken back cleanly.
pub fn perft<B: BoardModel>(board: &mut B, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        board.push(mv);
        nodes += perft(board, depth - 1);
        board.pop();
    }

    nodes
}

/// Performs perft with a per-root-move breakdown.
pub fn perft_divide<B: BoardModel>(board: &mut B, depth: u8) -> Vec<(Move, u64)> {
    let moves = board.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for mv in moves {
        board.push(&mv);
        let nodes = if depth <= 1 {
            1
        } else {
            perft(board, depth - 1)
        };
        board.pop();
        results.push((mv, nodes));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::positions;
    use crate::game_state::GameBoard;

    #[test]
    fn test_perft_starting_position() {
        let mut board = GameBoard::new();

        // Only test depths 1-3 to avoid timeout
        let test_positions = &[(1, 20), (2, 400), (3, 8902)];

        for &(depth, expected) in test_positions {
            let result = perft(&mut board, depth);
            assert_eq!(
                result, expected,
                "Perft({}) failed: expected {}, got {}",
                depth, expected, result
            );
        }
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_perft_kiwipete() {
        let mut board = GameBoard::from_fen(positions::KIWIPETE).unwrap();
        assert_eq!(perft(&mut board, 1), 48);
        assert_eq!(perft(&mut board, 2), 2039);
    }

    #[test]
    fn test_perft_divide() {
        let mut board = GameBoard::new();
        let results = perft_divide(&mut board, 1);

        assert_eq!(results.len(), 20);
        assert_eq!(results.iter().map(|(_, n)| n).sum::<u64>(), 20);

        let results = perft_divide(&mut board, 2);
        assert!(results.iter().all(|(_, n)| *n == 20));
    }
}
