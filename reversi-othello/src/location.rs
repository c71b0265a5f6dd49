//! Code for working with [`Location`]s and [`Move`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::EDGE_LENGTH;
use derive_more::{Display, Error, From, Into};
use std::fmt::{self, Formatter, Write};

const FILES: &str = "ABCDEFGH";
const RANKS: &str = "12345678";

/// A location on the Othello board, stored as a one-hot [`Bitboard`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
pub struct Location(Bitboard);

/// A set of locations on the Othello board, which can be iterated to retrieve them
/// in ascending index order (A1, B1, ..., H8).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, From, Into)]
pub struct LocationList(Bitboard);

/// An action in an Othello game: place a disc or pass.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Move {
    Piece(Location),
    Pass,
}

impl Location {
    /// Convert from a one-hot [`Bitboard`].
    /// Returns None unless exactly one square is set.
    #[inline]
    pub fn from_onehot(bitboard: Bitboard) -> Option<Self> {
        if bitboard.count_occupied() == 1 {
            Some(Self(bitboard))
        } else {
            None
        }
    }

    /// Convert from a square index in `0..64`.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        debug_assert!((index as usize) < crate::NUM_SPACES);
        Self(Bitboard::from_index(index))
    }

    /// Convert into a square index in `0..64`.
    #[inline]
    pub fn to_index(self) -> u8 {
        self.0.bits().trailing_zeros() as u8
    }

    /// Convert from file (`x`) and rank (`y`) coordinates, both zero-based.
    /// Returns None if either coordinate is off the board.
    pub fn from_coords(x: usize, y: usize) -> Option<Self> {
        if x >= EDGE_LENGTH || y >= EDGE_LENGTH {
            return None;
        }

        Some(Self::from_index((x + y * EDGE_LENGTH) as u8))
    }

    /// Get the zero-based `(x, y)` coordinates: file, then rank.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index() as usize;
        (index % EDGE_LENGTH, index / EDGE_LENGTH)
    }

    #[inline]
    pub fn bitboard(self) -> Bitboard {
        self.0
    }
}

/// Convert this [`Location`] into string notation ("C4").
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_coords();
        f.write_char(FILES.chars().nth(x).ok_or(fmt::Error)?)?;
        f.write_char(RANKS.chars().nth(y).ok_or(fmt::Error)?)
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid location string")]
pub struct ParseLocationError;

/// Build a [`Location`] from 1-indexed, case-insensitive notation ("c4", "H8").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let file_char = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let x = FILES.find(file_char).ok_or(ParseLocationError)?;
        let rank = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if rank == 0 || chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Self::from_coords(x, rank - 1).ok_or(ParseLocationError)
    }
}

impl Move {
    /// Get the location of a placement, or None for a pass.
    pub fn location(self) -> Option<Location> {
        match self {
            Move::Piece(loc) => Some(loc),
            Move::Pass => None,
        }
    }

    pub fn is_pass(self) -> bool {
        self == Move::Pass
    }
}

impl From<Location> for Move {
    fn from(loc: Location) -> Self {
        Move::Piece(loc)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Move::Piece(loc) => loc.fmt(f),
            Move::Pass => f.write_str("PASS"),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid move string")]
pub struct ParseMoveError;

/// Parse a [`Move`]: either location notation or "pass" in any case.
impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }

        s.parse().map(Move::Piece).or(Err(ParseMoveError))
    }
}

impl LocationList {
    /// Returns whether `loc` is in this list.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        self.0.intersects(loc.0)
    }

    /// Returns whether the list has no locations.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn bitboard(self) -> Bitboard {
        self.0
    }
}

impl ExactSizeIterator for LocationList {
    fn len(&self) -> usize {
        self.0.count_occupied() as usize
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.0.is_empty() {
            return None;
        }

        let bits = self.0.bits();
        let next_move = Bitboard::new(bits & bits.wrapping_neg());
        self.0 ^= next_move;

        Some(Location(next_move))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|loc| loc.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_from_index() {
        assert_eq!(Location::from_index(0), Location(Bitboard::new(1)));
        assert_eq!(Location::from_index(63), Location(Bitboard::new(1 << 63)));
    }

    #[test]
    fn location_to_index() {
        assert_eq!(Location(Bitboard::new(1)).to_index(), 0);
        assert_eq!(Location(Bitboard::new(1 << 63)).to_index(), 63);
    }

    #[test]
    fn location_from_coords() {
        assert_eq!(Location::from_coords(0, 0), Some(Location(Bitboard::new(1))));
        assert_eq!(
            Location::from_coords(7, 7),
            Some(Location(Bitboard::new(1 << 63)))
        );
        assert_eq!(Location::from_coords(1, 0), Some(Location::from_index(1)));
        assert_eq!(Location::from_coords(0, 1), Some(Location::from_index(8)));
        assert_eq!(Location::from_coords(0, 8), None);
        assert_eq!(Location::from_coords(8, 0), None);
    }

    #[test]
    fn location_coords_round_trip() {
        for index in 0..64 {
            let loc = Location::from_index(index);
            let (x, y) = loc.to_coords();
            assert_eq!(Location::from_coords(x, y), Some(loc));
        }
    }

    #[test]
    fn location_from_onehot() {
        assert_eq!(
            Location::from_onehot(Bitboard::new(1 << 20)),
            Some(Location::from_index(20))
        );
        assert_eq!(Location::from_onehot(Bitboard::new(0b11)), None);
        assert_eq!(Location::from_onehot(Bitboard::EMPTY), None);
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(Location::from_str("A1"), Ok(Location(Bitboard::new(1))));
        assert_eq!(Location::from_str("h8"), Ok(Location(Bitboard::new(1 << 63))));
        assert_eq!(Location::from_str("D7"), Location::from_coords(3, 6).ok_or(ParseLocationError));
        assert_eq!(Location::from_str("c4"), Ok(Location::from_index(26)));
    }

    #[test]
    fn location_from_str_fail() {
        assert_eq!(Location::from_str(""), Err(ParseLocationError));
        assert_eq!(Location::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Location::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Location::from_str("I5"), Err(ParseLocationError));
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location(Bitboard::new(1)).to_string(), "A1");
        assert_eq!(Location(Bitboard::new(1 << 63)).to_string(), "H8");
        assert_eq!(Location::from_str("E2").unwrap().to_string(), "E2");
        assert_eq!(Location::from_str("f6").unwrap().to_string(), "F6");
    }

    #[test]
    fn move_from_str() {
        assert_eq!(Move::from_str("pass"), Ok(Move::Pass));
        assert_eq!(Move::from_str("PASS\n"), Ok(Move::Pass));
        assert_eq!(
            Move::from_str("d3"),
            Ok(Move::Piece(Location::from_index(19)))
        );
        assert_eq!(Move::from_str("z9"), Err(ParseMoveError));
    }

    #[test]
    fn location_list_iterates_in_index_order() {
        let list = LocationList::from(Bitboard::new((1 << 40) | (1 << 3) | (1 << 17)));
        assert_eq!(list.len(), 3);
        let indices: Vec<u8> = list.map(Location::to_index).collect();
        assert_eq!(indices, vec![3, 17, 40]);
        assert!(list.contains(Location::from_index(17)));
        assert!(!list.contains(Location::from_index(18)));
    }

    #[test]
    fn location_list_to_str() {
        let list = LocationList::from(Bitboard::new((1 << 26) | (1 << 19)));
        assert_eq!(list.to_string(), "[D3, C4]");
        assert_eq!(LocationList::default().to_string(), "[]");
    }
}
