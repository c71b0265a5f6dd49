//! `reversi-search` chooses Othello moves by negamax search with alpha-beta
//! pruning over [`reversi_othello::Board`] values.
//!
//! Build a [`Searcher`] from a [`SearchConfig`], then call [`Searcher::search`]
//! with a board and the color to move.

pub mod config;
pub mod eval;
pub mod search;

pub use config::{InvalidConfigurationError, SearchConfig, Weights};
pub use eval::Evaluator;
pub use search::{NoLegalMoveError, SearchResult, Searcher};

/// Evaluation and search scores. Positive values favor the color being scored for.
pub type Score = f64;
