use crate::{
    evaluation::{Evaluator, HeuristicEvaluator},
    search::{Fallback, Search, SearchReport},
    ensure_playable, Agent, AgentError,
};
use arena_core::{BoardModel, Move};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Reference search depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;

/// Fixed-depth minimax with alpha-beta pruning.
pub struct SearchAgent<E = HeuristicEvaluator> {
    name: String,
    depth: u8,
    evaluator: E,
    fallback: Fallback,
    rng: StdRng,
}

impl SearchAgent {
    pub fn new(depth: u8) -> Self {
        SearchAgent {
            name: format!("Minimax(depth={})", depth),
            depth,
            evaluator: HeuristicEvaluator::default(),
            fallback: Fallback::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SearchAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl<E> SearchAgent<E> {
    /// Seeds the generator behind the random fallback move.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replaces the evaluator, keeping depth, fallback and generator.
    pub fn with_evaluator<F>(self, evaluator: F) -> SearchAgent<F> {
        SearchAgent {
            name: self.name,
            depth: self.depth,
            evaluator,
            fallback: self.fallback,
            rng: self.rng,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Runs the configured search from `board` and reports move, score and
    /// node count. The board is restored before returning.
    pub fn search<B>(&mut self, board: &mut B) -> SearchReport
    where
        B: BoardModel,
        E: Evaluator<B>,
    {
        let mut search = Search::new(&self.evaluator, &mut self.rng, self.fallback);
        let result = search.run(board, self.depth);
        let report = SearchReport {
            best_move: result.best_move,
            score: result.score,
            depth: self.depth,
            nodes: search.nodes(),
        };

        debug!(
            agent = %self.name,
            depth = report.depth,
            score = report.score,
            nodes = report.nodes,
            best_move = ?report.best_move,
            "search finished"
        );

        report
    }
}

impl<B, E> Agent<B> for SearchAgent<E>
where
    B: BoardModel,
    E: Evaluator<B>,
{
    fn pick_move(&mut self, board: &mut B) -> Result<Move, AgentError> {
        if self.depth == 0 {
            return Err(AgentError::ZeroDepth);
        }

        ensure_playable(board)?;

        self.search(board).best_move.ok_or(AgentError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
