//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for tuning and validating move generation.
//! A forced pass counts as a ply; a game that ends early counts as one leaf.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::board::{Board, Color};

/// Count the leaves `depth` plies below the opening position.
pub fn run_perft(depth: u64) -> u64 {
    perft(Board::new(), Color::Black, depth)
}

/// Count the leaves `depth` plies below `board` with `color` to move.
pub fn perft(board: Board, color: Color, depth: u64) -> u64 {
    leaves_below(board, color, depth, false)
}

fn leaves_below(board: Board, color: Color, depth: u64, passed: bool) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let all_moves = board.legal_moves(color);
    if all_moves.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return leaves_below(board, !color, depth - 1, true);
    }

    all_moves
        .map(|loc| leaves_below(board.place_unchecked(color, loc), !color, depth - 1, false))
        .sum()
}
