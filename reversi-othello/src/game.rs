//! Implements game-level Othello logic: a [`Board`] plus the color to move.
//!
//! For correctness, this higher-level interface is preferred, but for
//! performance you may use [`Board`] and [`movegen`](crate::movegen) directly.

use crate::board::{Board, Color, IllegalMoveError};
use crate::location::{LocationList, Move};
use derive_more::Display;
use std::fmt;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Outcome {
    #[display(fmt = "{} wins", _0)]
    Win(Color),
    #[display(fmt = "draw")]
    Draw,
}

/// The complete state of an Othello game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Game {
    pub board: Board,
    pub active: Color,
}

impl Default for Game {
    /// The opening position with black to move.
    fn default() -> Self {
        Self::new(Board::new(), Color::default())
    }
}

impl Game {
    pub const fn new(board: Board, active: Color) -> Self {
        Self { board, active }
    }

    /// Get the placements available to the active player.
    #[inline]
    pub fn legal_moves(self) -> LocationList {
        self.board.legal_moves(self.active)
    }

    /// Play `mv` for the active player and hand the turn to the opponent.
    pub fn apply(self, mv: Move) -> Result<Self, IllegalMoveError> {
        let board = self.board.apply(self.active, mv)?;
        Ok(Self::new(board, !self.active))
    }

    /// The moves the active player may choose from: its placements, or a lone pass.
    pub fn actions(self) -> Vec<Move> {
        let moves = self.legal_moves();
        if moves.is_empty() {
            vec![Move::Pass]
        } else {
            moves.map(Move::Piece).collect()
        }
    }

    #[inline]
    pub fn is_finished(self) -> bool {
        self.board.is_terminal()
    }

    /// Get the outcome, or None while the game is still running.
    pub fn outcome(self) -> Option<Outcome> {
        if !self.is_finished() {
            return None;
        }

        Some(match self.board.leader() {
            Some(color) => Outcome::Win(color),
            None => Outcome::Draw,
        })
    }

    /// Get the winner of a finished game. None for a draw or an unfinished game.
    pub fn winner(self) -> Option<Color> {
        match self.outcome() {
            Some(Outcome::Win(color)) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.active)
    }
}
