pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;

use arena_core::{BoardModel, GameStatus, Move};
use thiserror::Error;

/// Core trait for chess agents
pub trait Agent<B: BoardModel> {
    /// Picks a legal move for the side to move.
    ///
    /// The board may be explored in place but is handed back exactly as it
    /// was received. Asking for a move when the game is already over is an
    /// error, never an absent move.
    fn pick_move(&mut self, board: &mut B) -> Result<Move, AgentError>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

/// Invalid states an agent refuses to pick a move in.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentError {
    #[error("invalid state: no legal moves in this position")]
    NoLegalMoves,

    #[error("invalid state: the game is already over ({0})")]
    GameOver(GameStatus),

    #[error("invalid configuration: search depth must be at least 1")]
    ZeroDepth,
}

/// Refuses boards on which no move may be asked for.
pub(crate) fn ensure_playable<B: BoardModel>(board: &B) -> Result<(), AgentError> {
    match board.status() {
        GameStatus::Ongoing => Ok(()),
        GameStatus::Checkmate | GameStatus::Stalemate => Err(AgentError::NoLegalMoves),
        status => Err(AgentError::GameOver(status)),
    }
}

pub use evaluation::{Evaluator, HeuristicEvaluator, Weights, CHECKMATE_SCORE};
pub use minimax::SearchAgent;
pub use random::RandomAgent;
pub use search::{Fallback, Search, SearchReport, SearchResult};
