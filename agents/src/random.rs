use crate::{ensure_playable, Agent, AgentError};
use arena_core::{BoardModel, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Same sequence of choices for the same seed and positions.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            name: format!("Random(seed={})", seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BoardModel> Agent<B> for RandomAgent {
    fn pick_move(&mut self, board: &mut B) -> Result<Move, AgentError> {
        ensure_playable(board)?;

        let moves = board.legal_moves();
        moves
            .choose(&mut self.rng)
            .cloned()
            .ok_or(AgentError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
