//! Static evaluation of positions.

use crate::config::Weights;
use crate::Score;
use reversi_othello::{Bitboard, Board, Color, Location};

/// Multiplier lifting a finished game's disc differential above any heuristic value.
pub const DECIDED_GAME_SCALE: Score = 1_000.0;

/// Outer-ring squares that are not corners.
const EDGES_ONLY: Bitboard = Bitboard::new(Bitboard::EDGES.bits() & !Bitboard::CORNERS.bits());

/// Scores boards from one color's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evaluator {
    weights: Weights,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Final score: `color`'s discs minus the opponent's.
    #[inline]
    pub fn terminal_score(board: &Board, color: Color) -> i32 {
        board.disc_difference(color) as i32
    }

    /// Value of a finished game, scaled so any win beats any unfinished position.
    #[inline]
    pub fn decided_value(board: &Board, color: Color) -> Score {
        Self::terminal_score(board, color) as Score * DECIDED_GAME_SCALE
    }

    /// Heuristic value of an unfinished position for `color`:
    /// positional weights, mobility and disc differential.
    /// Antisymmetric: the opponent's score is the negation.
    pub fn heuristic_score(&self, board: &Board, color: Color) -> Score {
        let (mine, theirs) = board.sides(color);

        let positional = self.weights.corner * differential(mine, theirs, Bitboard::CORNERS)
            + self.weights.edge * differential(mine, theirs, EDGES_ONLY);

        let mobility = board.legal_moves(color).len() as Score
            - board.legal_moves(!color).len() as Score;

        let discs = Self::terminal_score(board, color) as Score;

        positional + self.weights.mobility * mobility + self.weights.discs * discs
    }

    /// Static weight of a single square; used to order moves.
    #[inline]
    pub fn cell_weight(&self, loc: Location) -> Score {
        let square = loc.bitboard();
        if square.intersects(Bitboard::CORNERS) {
            self.weights.corner
        } else if square.intersects(EDGES_ONLY) {
            self.weights.edge
        } else {
            0.0
        }
    }
}

/// Count of `mine` minus count of `theirs` inside `region`.
#[inline]
fn differential(mine: Bitboard, theirs: Bitboard, region: Bitboard) -> Score {
    (mine & region).count_occupied() as Score - (theirs & region).count_occupied() as Score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn opening_is_balanced() {
        let eval = Evaluator::default();
        let board = Board::new();
        assert_eq!(eval.heuristic_score(&board, Color::Black), 0.0);
        assert_eq!(Evaluator::terminal_score(&board, Color::White), 0);
    }

    #[test]
    fn scores_are_antisymmetric() {
        let eval = Evaluator::default();
        let board = board(
            "
            X.......
            .XO.....
            ..XO....
            ...XXO..
            ...OX...
            ........
            ........
            .......O",
        );
        assert_eq!(
            eval.heuristic_score(&board, Color::Black),
            -eval.heuristic_score(&board, Color::White)
        );
        assert_eq!(
            Evaluator::terminal_score(&board, Color::Black),
            -Evaluator::terminal_score(&board, Color::White)
        );
    }

    #[test]
    fn swapping_colors_swaps_perspective() {
        let eval = Evaluator::default();
        let board = board(
            "
            X.......
            .XO.....
            ..XO....
            ...XXO..
            ...OX...
            ..O.....
            ........
            O......X",
        );
        let swapped = board.swap_colors();

        assert_eq!(
            eval.heuristic_score(&board, Color::Black),
            eval.heuristic_score(&swapped, Color::White)
        );
        assert_eq!(
            Evaluator::terminal_score(&board, Color::White),
            Evaluator::terminal_score(&swapped, Color::Black)
        );
    }

    #[test]
    fn owning_corners_is_never_worse() {
        let eval = Evaluator::default();
        // Same disc counts and a closed middle; only corner ownership differs.
        let with_corners = board(
            "
            X......X
            O......O
            ........
            ...XO...
            ...OX...
            ........
            O......O
            X......X",
        );
        let without_corners = board(
            "
            O......O
            X......X
            ........
            ...XO...
            ...OX...
            ........
            X......X
            O......O",
        );

        assert!(
            eval.heuristic_score(&with_corners, Color::Black)
                >= eval.heuristic_score(&without_corners, Color::Black)
        );
    }

    #[test]
    fn corner_term_tracks_its_weight() {
        let position = board(&format!("X{}", ".".repeat(63)));
        let only_corners = Evaluator::new(Weights {
            corner: 10.0,
            edge: 0.0,
            mobility: 0.0,
            discs: 0.0,
        });
        assert_eq!(only_corners.heuristic_score(&position, Color::Black), 10.0);
        assert_eq!(only_corners.heuristic_score(&position, Color::White), -10.0);
    }

    #[test]
    fn cell_weights_rank_corners_first() {
        let eval = Evaluator::default();
        let a1: Location = "a1".parse().unwrap();
        let a4: Location = "a4".parse().unwrap();
        let d4: Location = "d4".parse().unwrap();
        assert!(eval.cell_weight(a1) > eval.cell_weight(a4));
        assert!(eval.cell_weight(a4) > eval.cell_weight(d4));
    }

    #[test]
    fn decided_value_scales_disc_difference() {
        let lone = Board::from_bitboards(Bitboard::from_index(0), Bitboard::EMPTY).unwrap();
        assert_eq!(Evaluator::decided_value(&lone, Color::Black), DECIDED_GAME_SCALE);
        assert_eq!(Evaluator::decided_value(&lone, Color::White), -DECIDED_GAME_SCALE);
    }
}
