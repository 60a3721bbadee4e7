use arena_agents::{Agent, AgentError};
use arena_core::{BoardModel, Color, Move, Outcome, Uci};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayError {
    #[error("{agent} could not move: {source}")]
    Agent {
        agent: String,
        #[source]
        source: AgentError,
    },

    #[error("{agent} returned an illegal move: {uci}")]
    IllegalMove { agent: String, uci: String },
}

/// Plays one game to the end, alternating between the two agents.
///
/// `on_move` sees every committed move together with the board after it
/// was played. Returns the final outcome; a board that is already
/// terminal returns immediately without consulting either agent.
pub fn play<B, F>(
    white: &mut dyn Agent<B>,
    black: &mut dyn Agent<B>,
    board: &mut B,
    mut on_move: F,
) -> Result<Outcome, PlayError>
where
    B: BoardModel,
    F: FnMut(&B, &Move),
{
    info!(white = white.name(), black = black.name(), "game started");

    let mut plies = 0u32;
    loop {
        if let Some(outcome) = Outcome::of(board) {
            info!(status = %outcome.status, winner = ?outcome.winner, plies, "game over");
            return Ok(outcome);
        }

        let agent: &mut dyn Agent<B> = match board.turn() {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };

        let mv = agent.pick_move(board).map_err(|source| PlayError::Agent {
            agent: agent.name().to_string(),
            source,
        })?;

        if !board.legal_moves().contains(&mv) {
            return Err(PlayError::IllegalMove {
                agent: agent.name().to_string(),
                uci: Uci::from_standard(mv).to_string(),
            });
        }

        debug!(agent = agent.name(), mv = %Uci::from_standard(mv), "move");
        board.push(&mv);
        plies += 1;
        on_move(board, &mv);
    }
}

/// Announcement for a finished game.
pub fn verdict(outcome: &Outcome) -> &'static str {
    match outcome.winner {
        Some(Color::White) => "White wins!",
        Some(Color::Black) => "Black wins!",
        None => "It's a draw!",
    }
}
