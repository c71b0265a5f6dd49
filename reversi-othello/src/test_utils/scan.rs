//! Slow, obviously-correct reference move generation.
//!
//! Walks the board square by square and ray by ray using coordinates instead
//! of shifts, so it shares no edge-masking logic with [`movegen`](crate::movegen).

use crate::bitboard::Bitboard;
use crate::board::{Board, Color};
use crate::location::Location;
use crate::movegen::Direction;

/// Opponent discs captured along one ray from `loc`, or none if the ray is not closed.
fn ray_flips(board: &Board, color: Color, loc: Location, direction: Direction) -> Bitboard {
    let (dx, dy) = direction.delta();
    let (x, y) = loc.to_coords();
    let (mut x, mut y) = (x as i8 + dx, y as i8 + dy);
    let mut run = Bitboard::EMPTY;

    while (0..8).contains(&x) && (0..8).contains(&y) {
        let square = match Location::from_coords(x as usize, y as usize) {
            Some(square) => square,
            None => break,
        };

        match board.owner(square) {
            Some(owner) if owner == color => return run,
            Some(_) => run |= square.bitboard(),
            None => break,
        }

        x += dx;
        y += dy;
    }

    Bitboard::EMPTY
}

/// Discs flipped by `color` placing at `loc`; empty if `loc` is occupied.
pub fn flips(board: &Board, color: Color, loc: Location) -> Bitboard {
    if board.owner(loc).is_some() {
        return Bitboard::EMPTY;
    }

    Direction::ALL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &direction| {
            acc | ray_flips(board, color, loc, direction)
        })
}

/// Every empty square where `color` would flip at least one disc.
pub fn legal_moves(board: &Board, color: Color) -> Bitboard {
    (0..64u8)
        .map(Location::from_index)
        .filter(|&loc| !flips(board, color, loc).is_empty())
        .fold(Bitboard::EMPTY, |acc, loc| acc | loc.bitboard())
}
