//! The [`Board`]: two disjoint color bitboards and the rules that act on them.
//!
//! Boards are small `Copy` values. Applying a move never mutates a board in
//! place; it returns the successor, so a search can back up by simply
//! dropping the child value.

use crate::bitboard::Bitboard;
use crate::location::{Location, LocationList, Move};
use crate::{movegen, utils, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Color {
    #[display(fmt = "Black")]
    Black,
    #[display(fmt = "White")]
    White,
}

impl Default for Color {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid color string")]
pub struct ParseColorError;

/// Parse a [`Color`] from "black"/"white", "b"/"w" or "x"/"o", in any case.
impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" | "x" => Ok(Color::Black),
            "white" | "w" | "o" => Ok(Color::White),
            _ => Err(ParseColorError),
        }
    }
}

/// A move that the rules do not allow in the position it was played in.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "illegal move {} for {}", mv, color)]
pub struct IllegalMoveError {
    pub color: Color,
    pub mv: Move,
}

/// Raised when building a board from bitboards that claim the same square.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "black and white bitboards overlap")]
pub struct OverlappingBoardError;

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[display(fmt = "board strings need exactly 64 squares")]
    WrongLength,
    #[display(fmt = "unrecognized square character")]
    BadSquare,
}

/// A complete Othello position: one bitboard per color.
/// Invariant: no square is set in both bitboards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard four-disc opening position.
    pub const fn new() -> Self {
        Self {
            black: Bitboard::BLACK_START,
            white: Bitboard::WHITE_START,
        }
    }

    /// Build a board from color bitboards, checking that they are disjoint.
    pub fn from_bitboards(
        black: Bitboard,
        white: Bitboard,
    ) -> Result<Self, OverlappingBoardError> {
        if black.intersects(white) {
            return Err(OverlappingBoardError);
        }

        Ok(Self { black, white })
    }

    #[inline]
    pub fn black(self) -> Bitboard {
        self.black
    }

    #[inline]
    pub fn white(self) -> Bitboard {
        self.white
    }

    /// Get the discs belonging to `color`.
    #[inline]
    pub fn discs(self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Get `(mover, opponent)` bitboards from `color`'s point of view.
    #[inline]
    pub fn sides(self, color: Color) -> (Bitboard, Bitboard) {
        match color {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        }
    }

    /// Rebuild a board from `(mover, opponent)` bitboards seen by `color`.
    #[inline]
    fn from_sides(color: Color, active: Bitboard, opponent: Bitboard) -> Self {
        match color {
            Color::Black => Self {
                black: active,
                white: opponent,
            },
            Color::White => Self {
                black: opponent,
                white: active,
            },
        }
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied(self) -> Bitboard {
        self.black | self.white
    }

    /// Get a mask indicating where the empty spaces are.
    #[inline]
    pub fn empty(self) -> Bitboard {
        !self.occupied()
    }

    /// Count the empty squares left on the board.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.occupied().count_empty()
    }

    /// Count the discs belonging to `color`.
    #[inline]
    pub fn disc_count(self, color: Color) -> u8 {
        self.discs(color).count_occupied()
    }

    /// Get the legal moves for `color`.
    #[inline]
    pub fn legal_moves(self, color: Color) -> LocationList {
        movegen::legal_moves(&self, color)
    }

    /// Return true if `color` has at least one placement available.
    #[inline]
    pub fn has_moves(self, color: Color) -> bool {
        !self.legal_moves(color).is_empty()
    }

    /// The game is over when neither color can place a disc.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.has_moves(Color::Black) && !self.has_moves(Color::White)
    }

    /// Place a disc for `color` without checking legality.
    /// Placing on a square that captures nothing leaves an inconsistent game.
    #[inline]
    pub fn place_unchecked(self, color: Color, loc: Location) -> Self {
        let (active, opponent) = self.sides(color);
        let (active, opponent) = movegen::apply_move(active, opponent, loc.bitboard());
        Self::from_sides(color, active, opponent)
    }

    /// Play `mv` for `color`, returning the resulting board.
    ///
    /// A placement must be one of [`Board::legal_moves`]. A pass is accepted only
    /// when `color` has no placement available, and returns the board unchanged.
    pub fn apply(self, color: Color, mv: Move) -> Result<Self, IllegalMoveError> {
        let legal = self.legal_moves(color);

        match mv {
            Move::Pass if legal.is_empty() => Ok(self),
            Move::Piece(loc) if legal.contains(loc) => Ok(self.place_unchecked(color, loc)),
            _ => Err(IllegalMoveError { color, mv }),
        }
    }

    /// Final score from `color`'s point of view: its discs minus the opponent's.
    #[inline]
    pub fn disc_difference(self, color: Color) -> i8 {
        self.disc_count(color) as i8 - self.disc_count(!color) as i8
    }

    /// Get the color with more discs, or None if they are level.
    pub fn leader(self) -> Option<Color> {
        match self.disc_difference(Color::Black) {
            d if d > 0 => Some(Color::Black),
            d if d < 0 => Some(Color::White),
            _ => None,
        }
    }

    /// The square's owner, if any.
    pub fn owner(self, loc: Location) -> Option<Color> {
        if self.black.intersects(loc.bitboard()) {
            Some(Color::Black)
        } else if self.white.intersects(loc.bitboard()) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Swap the colors of every disc.
    pub fn swap_colors(self) -> Self {
        Self {
            black: self.white,
            white: self.black,
        }
    }
}

/// Print the board as a grid with rank 1 at the top: `X` black, `O` white.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares = (0..NUM_SPACES as u8).map(|index| {
            match (
                self.black.contains_index(index),
                self.white.contains_index(index),
            ) {
                (true, _) => 'X',
                (_, true) => 'O',
                _ => '.',
            }
        });

        utils::format_grid(squares, f)
    }
}

/// Parse 64 squares in order A1, B1, ..., H8, ignoring whitespace.
/// `X`/`B`/`*` are black, `O`/`W` are white, `.`/`-` are empty.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = 0u64;
        let mut white = 0u64;
        let mut index = 0usize;

        for square in s.chars().filter(|c| !c.is_whitespace()) {
            if index >= NUM_SPACES {
                return Err(ParseBoardError::WrongLength);
            }

            match square.to_ascii_uppercase() {
                'X' | 'B' | '*' => black |= 1 << index,
                'O' | 'W' => white |= 1 << index,
                '.' | '-' => {}
                _ => return Err(ParseBoardError::BadSquare),
            }
            index += 1;
        }

        if index != NUM_SPACES {
            return Err(ParseBoardError::WrongLength);
        }

        Ok(Self {
            black: Bitboard::new(black),
            white: Bitboard::new(white),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn loc(s: &str) -> Location {
        s.parse().unwrap()
    }

    #[test]
    fn opening_position() {
        let board = Board::new();
        assert_eq!(board.owner(loc("d5")), Some(Color::Black));
        assert_eq!(board.owner(loc("e4")), Some(Color::Black));
        assert_eq!(board.owner(loc("d4")), Some(Color::White));
        assert_eq!(board.owner(loc("e5")), Some(Color::White));
        assert_eq!(board.disc_count(Color::Black), 2);
        assert_eq!(board.disc_count(Color::White), 2);
        assert_eq!(board.count_empty(), 60);
        assert!(!board.is_terminal());
    }

    #[test]
    fn opening_has_four_moves_for_black() {
        let moves = Board::new().legal_moves(Color::Black);
        assert_eq!(moves.len(), 4);
        for name in ["c4", "d3", "e6", "f5"] {
            assert!(moves.contains(loc(name)), "{} should be legal", name);
        }
    }

    #[test]
    fn apply_flips_and_keeps_original() {
        let board = Board::new();
        let next = board.apply(Color::Black, Move::Piece(loc("d3"))).unwrap();

        assert_eq!(next.disc_count(Color::Black), 4);
        assert_eq!(next.disc_count(Color::White), 1);
        assert_eq!(next.owner(loc("d4")), Some(Color::Black));
        assert!(!next.black().intersects(next.white()));

        assert_eq!(board, Board::new());
    }

    #[test]
    fn apply_rejects_illegal_placement() {
        let board = Board::new();
        let mv = Move::Piece(loc("a1"));
        assert_eq!(
            board.apply(Color::Black, mv),
            Err(IllegalMoveError {
                color: Color::Black,
                mv
            })
        );

        let occupied = Move::Piece(loc("d4"));
        assert!(board.apply(Color::Black, occupied).is_err());
    }

    #[test]
    fn pass_only_when_no_moves() {
        let board = Board::new();
        assert!(board.apply(Color::Black, Move::Pass).is_err());

        // Black A1 B1, white C1: white is stuck, black can play D1.
        let board = Board::from_str(&format!("XXO{}", ".".repeat(61))).unwrap();
        assert!(board.legal_moves(Color::White).is_empty());
        assert_eq!(board.apply(Color::White, Move::Pass), Ok(board));
        assert!(!board.is_terminal());
    }

    #[test]
    fn terminal_when_nobody_can_move() {
        let board = Board::from_str(&format!("X{}O", ".".repeat(62))).unwrap();
        assert!(board.is_terminal());
        assert_eq!(board.leader(), None);

        let full_black = Board::from_bitboards(Bitboard::FULL, Bitboard::EMPTY).unwrap();
        assert!(full_black.is_terminal());
        assert_eq!(full_black.disc_difference(Color::Black), 64);
        assert_eq!(full_black.leader(), Some(Color::Black));
    }

    #[test]
    fn from_bitboards_rejects_overlap() {
        assert_eq!(
            Board::from_bitboards(Bitboard::new(0b11), Bitboard::new(0b10)),
            Err(OverlappingBoardError)
        );
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(Board::from_str("X"), Err(ParseBoardError::WrongLength));
        assert_eq!(
            Board::from_str(&"?".repeat(64)),
            Err(ParseBoardError::BadSquare)
        );

        let text = Board::new().to_string();
        let board: Board = text
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().skip(1).collect::<String>())
            .collect::<String>()
            .parse()
            .unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn color_parsing() {
        assert_eq!(Color::from_str("Black"), Ok(Color::Black));
        assert_eq!(Color::from_str("o"), Ok(Color::White));
        assert_eq!(Color::from_str("red"), Err(ParseColorError));
        assert_eq!(!Color::Black, Color::White);
    }
}
