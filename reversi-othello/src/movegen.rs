//! Branch-free move generation and move application on raw bitboards.
//!
//! Every function here works on an `(active, opponent)` pair of disjoint
//! bitboards. The functions are total: an empty move mask or an empty flip
//! mask is a legitimate answer, never an error. Legality of a requested move
//! is checked one level up, in [`Board::apply`](crate::Board::apply).

use crate::bitboard::Bitboard;
use crate::board::{Board, Color};
use crate::location::{Location, LocationList};

/// Everything except the A file.
const NOT_A_FILE: u64 = 0xFEFE_FEFE_FEFE_FEFE;

/// Everything except the H file.
const NOT_H_FILE: u64 = 0x7F7F_7F7F_7F7F_7F7F;

/// One of the eight compass directions a run of discs can extend in.
/// North is toward rank 8, east is toward file H.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// The four directions that shift toward higher indices. Their opposites
    /// cover the rest.
    const FORWARD: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
    ];

    /// Change in `(x, y)` for one step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Index distance covered by one step; the sign comes from `is_forward`.
    #[inline]
    const fn shift(self) -> u32 {
        match self {
            Direction::North | Direction::South => 8,
            Direction::East | Direction::West => 1,
            Direction::NorthEast | Direction::SouthWest => 9,
            Direction::NorthWest | Direction::SouthEast => 7,
        }
    }

    #[inline]
    const fn is_forward(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::NorthEast | Direction::NorthWest
        )
    }

    /// Squares a step in this direction is allowed to land on.
    /// Clears the file that a wrapped-around bit would end up in.
    #[inline]
    const fn landing_mask(self) -> u64 {
        match self {
            Direction::North | Direction::South => u64::MAX,
            Direction::East | Direction::NorthEast | Direction::SouthEast => NOT_A_FILE,
            Direction::West | Direction::NorthWest | Direction::SouthWest => NOT_H_FILE,
        }
    }

    /// Shift by `steps` squares without masking.
    #[inline]
    const fn shift_raw(self, bits: u64, steps: u32) -> u64 {
        if self.is_forward() {
            bits << (self.shift() * steps)
        } else {
            bits >> (self.shift() * steps)
        }
    }

    /// Move every set square one step in this direction.
    /// Squares that would leave the board, including across a file edge, are dropped.
    #[inline]
    pub const fn step_raw(self, bits: u64) -> u64 {
        self.shift_raw(bits, 1) & self.landing_mask()
    }

    /// [`Bitboard`] version of [`Direction::step_raw`].
    #[inline]
    pub fn step(self, bitboard: Bitboard) -> Bitboard {
        Bitboard::new(self.step_raw(bitboard.bits()))
    }

    /// Extend `generator` along this direction through contiguous `propagator` squares.
    /// Parallel-prefix (Kogge-Stone) fill: three doubling steps cover the longest
    /// possible run of six.
    #[inline]
    const fn fill(self, generator: u64, propagator: u64) -> u64 {
        let mut pro = propagator & self.landing_mask();
        let mut gen = generator;

        gen |= pro & self.shift_raw(gen, 1);
        pro &= self.shift_raw(pro, 1);
        gen |= pro & self.shift_raw(gen, 2);
        pro &= self.shift_raw(pro, 2);
        gen |= pro & self.shift_raw(gen, 4);

        gen
    }
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// For each direction: fill from our discs through opponent discs, then
/// take one more step onto an empty square.
#[inline]
pub fn move_mask(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let active = active.bits();
    let opponent = opponent.bits();
    let empties = !(active | opponent);

    let mut moves = 0;
    for direction in Direction::ALL {
        let run = direction.fill(active, opponent) & opponent;
        moves |= direction.step_raw(run);
    }

    Bitboard::new(moves & empties)
}

/// Compute the opponent discs flipped by placing at `move_mask`, which must be
/// a one-hot bitboard on an empty square. For each axis, the opponent run
/// filled outward from the move is intersected with the run filled back from
/// our own discs; only squares enclosed on both ends survive.
#[inline]
pub fn flip_mask(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> Bitboard {
    let active = active.bits();
    let opponent = opponent.bits();
    let mv = move_mask.bits();

    let mut flips = 0;
    for direction in Direction::FORWARD {
        let back = direction.opposite();

        let from_move = direction.fill(mv, opponent);
        let from_active = back.fill(active, opponent);
        flips |= from_move & from_active;

        let from_move = back.fill(mv, opponent);
        let from_active = direction.fill(active, opponent);
        flips |= from_move & from_active;
    }

    Bitboard::new(flips & opponent)
}

/// Compute updated bitboards after the active player places at `move_mask`.
/// Returns `(new_active, new_opponent)`. `move_mask` must be a legal move.
#[inline]
pub fn apply_move(
    active: Bitboard,
    opponent: Bitboard,
    move_mask: Bitboard,
) -> (Bitboard, Bitboard) {
    let flips = flip_mask(active, opponent, move_mask);
    (active | flips | move_mask, opponent ^ flips)
}

/// Get the legal moves for `color` on `board`.
#[inline]
pub fn legal_moves(board: &Board, color: Color) -> LocationList {
    let (active, opponent) = board.sides(color);
    LocationList::from(move_mask(active, opponent))
}

/// Get the discs `color` would flip by placing at `loc`.
/// Empty when `loc` is occupied or captures nothing.
#[inline]
pub fn flips(board: &Board, color: Color, loc: Location) -> Bitboard {
    if board.occupied().intersects(loc.bitboard()) {
        return Bitboard::EMPTY;
    }

    let (active, opponent) = board.sides(color);
    flip_mask(active, opponent, loc.bitboard())
}
