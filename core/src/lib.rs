pub mod board;
pub mod error;
pub mod fen;
pub mod game_state;
pub mod perft;
pub mod wire;

pub use board::*;
pub use error::{BoardError, WireError};
pub use fen::positions;
pub use game_state::GameBoard;
pub use perft::{perft, perft_divide};
pub use wire::{decode, encode, MoveReader, MoveWriter, FRAME_LEN};

pub use shakmaty::uci::UciMove as Uci;
pub use shakmaty::{Bitboard, Color, Move, Piece, Role, Square};
