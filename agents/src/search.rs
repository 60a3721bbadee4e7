//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search explores a single board in place. Every child is visited
//! through a [`Ply`] guard that pushes the move on entry and pops it when
//! dropped, so the board is restored on every exit path, unwinding
//! included.

use crate::evaluation::Evaluator;
use arena_core::{BoardModel, Color, Move};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::{Deref, DerefMut};

/// The side whose scores are maximized. Evaluations are positive for it.
pub const MAXIMIZER: Color = Color::White;

/// Move and score returned from every node.
///
/// `best_move` is `None` only at leaves: depth exhausted, game over, or no
/// legal move.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: f64,
}

/// Outcome of a root search, for callers that want the numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: f64,
    pub depth: u8,
    pub nodes: u64,
}

/// Move a node reports before any child has improved on its initial bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// A uniformly random legal move.
    #[default]
    Random,
    /// The first move in enumeration order.
    FirstLegal,
}

impl Fallback {
    fn pick<'m, R: Rng>(self, moves: &'m [Move], rng: &mut R) -> Option<&'m Move> {
        match self {
            Fallback::Random => moves.choose(rng),
            Fallback::FirstLegal => moves.first(),
        }
    }
}

/// A move pushed on the board for as long as the guard lives.
struct Ply<'b, B: BoardModel> {
    board: &'b mut B,
}

impl<'b, B: BoardModel> Ply<'b, B> {
    fn enter(board: &'b mut B, mv: &Move) -> Self {
        board.push(mv);
        Self { board }
    }
}

impl<B: BoardModel> Deref for Ply<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: BoardModel> DerefMut for Ply<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: BoardModel> Drop for Ply<'_, B> {
    fn drop(&mut self) {
        self.board.pop();
    }
}

/// State shared by all frames of one search.
pub struct Search<'a, E, R> {
    evaluator: &'a E,
    rng: &'a mut R,
    fallback: Fallback,
    nodes: u64,
}

impl<'a, E, R: Rng> Search<'a, E, R> {
    pub fn new(evaluator: &'a E, rng: &'a mut R, fallback: Fallback) -> Self {
        Self {
            evaluator,
            rng,
            fallback,
            nodes: 0,
        }
    }

    /// Nodes entered so far, leaves included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `depth` plies from `board` with a full window.
    pub fn run<B>(&mut self, board: &mut B, depth: u8) -> SearchResult
    where
        B: BoardModel,
        E: Evaluator<B>,
    {
        self.minimax(board, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// One frame of the search. Children are tried in the board's
    /// enumeration order; only a strictly better score replaces the current
    /// best, so ties go to the earlier move.
    pub fn minimax<B>(
        &mut self,
        board: &mut B,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> SearchResult
    where
        B: BoardModel,
        E: Evaluator<B>,
    {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return self.leaf(board);
        }

        let moves = board.legal_moves();
        let Some(fallback) = self.fallback.pick(&moves, &mut *self.rng).cloned() else {
            return self.leaf(board);
        };

        let maximizing = board.turn() == MAXIMIZER;
        let mut best = SearchResult {
            best_move: Some(fallback),
            score: if maximizing {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
        };

        for mv in moves {
            let score = {
                let mut child = Ply::enter(board, &mv);
                self.minimax(&mut *child, depth - 1, alpha, beta).score
            };

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        best_move: Some(mv),
                        score,
                    };
                }
                alpha = alpha.max(score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        best_move: Some(mv),
                        score,
                    };
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }

    fn leaf<B>(&self, board: &B) -> SearchResult
    where
        B: BoardModel,
        E: Evaluator<B>,
    {
        SearchResult {
            best_move: None,
            score: self.evaluator.evaluate(board),
        }
    }
}
