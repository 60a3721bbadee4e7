//! Static evaluation of positions.
//!
//! Scores are absolute: positive favors White, negative favors Black.

use arena_core::{BoardModel, Color, GameStatus, Role, Square};

/// Score of a position where the side to move has been checkmated,
/// from the winner's point of view.
pub const CHECKMATE_SCORE: f64 = 9999.0;

/// Maps a board to a signed score.
pub trait Evaluator<B: ?Sized> {
    fn evaluate(&self, board: &B) -> f64;
}

impl<B: ?Sized, F: Fn(&B) -> f64> Evaluator<B> for F {
    fn evaluate(&self, board: &B) -> f64 {
        self(board)
    }
}

/// One weight per piece type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceWeights {
    pub pawn: f64,
    pub knight: f64,
    pub bishop: f64,
    pub rook: f64,
    pub queen: f64,
    pub king: f64,
}

impl PieceWeights {
    pub fn get(&self, role: Role) -> f64 {
        match role {
            Role::Pawn => self.pawn,
            Role::Knight => self.knight,
            Role::Bishop => self.bishop,
            Role::Rook => self.rook,
            Role::Queen => self.queen,
            Role::King => self.king,
        }
    }
}

/// Bonus for occupying each square, a1 = 0 .. h8 = 63.
#[rustfmt::skip]
pub const POSITION_TABLE: [f64; 64] = [
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
    0.00, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.00,
    0.00, 0.05, 0.10, 0.10, 0.10, 0.10, 0.05, 0.00,
    0.00, 0.05, 0.10, 0.20, 0.20, 0.10, 0.05, 0.00,
    0.00, 0.05, 0.10, 0.20, 0.20, 0.10, 0.05, 0.00,
    0.00, 0.05, 0.10, 0.10, 0.10, 0.10, 0.05, 0.00,
    0.00, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.00,
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
];

/// Tunable constants of [`HeuristicEvaluator`].
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub material: PieceWeights,
    /// Per attacked square.
    pub mobility: PieceWeights,
    /// Charged against the side to move when it is in check.
    pub check_penalty: f64,
    pub position: [f64; 64],
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            material: PieceWeights {
                pawn: 1.0,
                knight: 3.0,
                bishop: 4.0,
                rook: 5.0,
                queen: 10.0,
                king: 0.0,
            },
            mobility: PieceWeights {
                pawn: 0.2,
                knight: 0.1,
                bishop: 0.1,
                rook: 0.05,
                queen: 0.02,
                king: 0.0,
            },
            check_penalty: 0.5,
            position: POSITION_TABLE,
        }
    }
}

/// Material, position, mobility and check, with terminal overrides.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: Weights,
}

impl HeuristicEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Piece values, + for White and - for Black.
    pub fn material<B: BoardModel + ?Sized>(&self, board: &B) -> f64 {
        pieces(board)
            .map(|(_, color, role)| sign(color) * self.weights.material.get(role))
            .sum()
    }

    /// Square bonuses. Added for every piece whatever its color: the table
    /// is neither mirrored nor signed for Black.
    pub fn positional<B: BoardModel + ?Sized>(&self, board: &B) -> f64 {
        pieces(board)
            .map(|(square, _, _)| self.weights.position[square as usize])
            .sum()
    }

    /// Attacked squares per piece times the piece type's weight, signed by color.
    pub fn mobility<B: BoardModel + ?Sized>(&self, board: &B) -> f64 {
        pieces(board)
            .map(|(square, color, role)| {
                let attacks = board.attacked_squares(square).count() as f64;
                sign(color) * attacks * self.weights.mobility.get(role)
            })
            .sum()
    }

    /// Penalty against the side to move if it is in check.
    pub fn check<B: BoardModel + ?Sized>(&self, board: &B) -> f64 {
        if board.is_check() {
            -sign(board.turn()) * self.weights.check_penalty
        } else {
            0.0
        }
    }
}

impl<B: BoardModel + ?Sized> Evaluator<B> for HeuristicEvaluator {
    fn evaluate(&self, board: &B) -> f64 {
        match board.status() {
            GameStatus::Checkmate => return mate_score(board.turn()),
            status if status.is_draw() => return 0.0,
            _ => {}
        }

        self.check(board) + self.material(board) + self.positional(board) + self.mobility(board)
    }
}

/// Sentinel for a position where `mated` is to move and has no escape.
pub fn mate_score(mated: Color) -> f64 {
    -sign(mated) * CHECKMATE_SCORE
}

fn sign(color: Color) -> f64 {
    match color {
        Color::White => 1.0,
        Color::Black => -1.0,
    }
}

fn pieces<B: BoardModel + ?Sized>(board: &B) -> impl Iterator<Item = (Square, Color, Role)> + '_ {
    (0..64u32).map(Square::new).filter_map(move |square| {
        board
            .piece_at(square)
            .map(|piece| (square, piece.color, piece.role))
    })
}
