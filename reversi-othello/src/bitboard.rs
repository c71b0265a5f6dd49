//! The [`Bitboard`] type: one bit per square of an Othello board.
//!
//! Bit `i` is the square at file `i % 8`, rank `i / 8`, so bit 0 is A1 and
//! bit 63 is H8. Shifting left by one moves a piece one file toward H, and
//! shifting left by eight moves it one rank toward 8.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    /// No squares set.
    pub const EMPTY: Self = Self(0);

    /// Every square set.
    pub const FULL: Self = Self(u64::MAX);

    /// The four corner squares: A1, H1, A8, H8.
    pub const CORNERS: Self = Self(0x8100_0000_0000_0081);

    /// Every square on the outer ring, corners included.
    pub const EDGES: Self = Self(0xFF81_8181_8181_81FF);

    /// Starting discs for Black: D5 and E4.
    pub const BLACK_START: Self = Self(0x0000_0008_1000_0000);

    /// Starting discs for White: D4 and E5.
    pub const WHITE_START: Self = Self(0x0000_0010_0800_0000);

    #[inline]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// A bitboard with only the square at `index` set.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        Self(1 << index)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub const fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub const fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if the square at `index` is set.
    #[inline]
    pub const fn contains_index(self, index: u8) -> bool {
        self.0 & (1 << index) != 0
    }

    /// Return true if the two bitboards share at least one square.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate over the indices of the set squares, lowest first.
    #[inline]
    pub fn indices(self) -> Indices {
        Indices(self.0)
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

/// Iterator for the bits in a [`Bitboard`], from A1 to H8.
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    next: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NUM_SPACES {
            return None;
        }

        let bit = self.bitboard.contains_index(self.next as u8);
        self.next += 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = NUM_SPACES - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over every square in row-major order, yielding whether it is set.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            next: 0,
            bitboard: self,
        }
    }
}

/// Iterator over the indices of the set squares in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Indices(u64);

impl Iterator for Indices {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }

        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Indices {}
