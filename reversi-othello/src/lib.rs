//! `reversi-othello` is a fast Othello library for engines and UIs.
//!
//! This package implements three levels of abstraction:
//!
//!  - [`movegen`] contains the raw, branch-free bitboard operations: legal-move
//!    masks, flip masks and move application on `(active, opponent)` pairs.
//!  - [`Board`] holds one bitboard per [`Color`] and checks moves before applying them.
//!    Boards are `Copy` values, which is what the search engine works with.
//!  - [`Game`] adds the side to move and end-of-game bookkeeping.

pub mod bitboard;
pub mod movegen;
pub mod test_utils;

mod board;
mod game;
mod location;
mod utils;

pub use bitboard::Bitboard;
pub use board::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
