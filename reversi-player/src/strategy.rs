//! The ways a side can pick its moves.

use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use reversi_othello::{movegen, Board, Color, LocationList, Move};
use reversi_search::{InvalidConfigurationError, SearchConfig, Searcher};
use serde::Deserialize;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// A move-picking policy. Strategies only choose; the game loop validates and applies.
#[derive(Debug)]
pub enum Strategy {
    /// Moves typed on an input stream.
    Human(Human),
    /// Uniformly random legal moves.
    Random(StdRng),
    /// The move flipping the most discs, lowest square on ties.
    Greedy,
    AlphaBeta(Searcher),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Strategy {
    /// Short name shown next to the side's score.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Human(_) => "human",
            Strategy::Random(_) => "random",
            Strategy::Greedy => "greedy",
            Strategy::AlphaBeta(_) => "alphabeta",
        }
    }

    pub fn random(seed: u64) -> Self {
        Strategy::Random(StdRng::seed_from_u64(seed))
    }

    pub fn alpha_beta(config: SearchConfig) -> Result<Self, InvalidConfigurationError> {
        Ok(Strategy::AlphaBeta(Searcher::new(config)?))
    }

    /// Pick a move for `color` among `legal`, or pass when `legal` is empty.
    pub fn choose_move(&mut self, board: &Board, color: Color, legal: LocationList) -> Move {
        match self {
            // A human acknowledges forced passes too.
            Strategy::Human(human) => human.read_move(color, legal),
            _ if legal.is_empty() => Move::Pass,
            Strategy::Random(rng) => legal.choose(rng).map_or(Move::Pass, Move::Piece),
            Strategy::Greedy => greedy(board, color, legal),
            // `legal` is non-empty here, so the position is not terminal and
            // the search cannot fail.
            Strategy::AlphaBeta(searcher) => {
                debug_assert!(!board.is_terminal(), "searching a finished game");
                match searcher.search(*board, color) {
                    Ok(result) => result.best_move,
                    Err(err) => {
                        log::error!("search failed with legal moves available: {}", err);
                        Move::Pass
                    }
                }
            }
        }
    }
}

fn greedy(board: &Board, color: Color, legal: LocationList) -> Move {
    let mut best = Move::Pass;
    let mut most_flips = 0;

    for loc in legal {
        let flips = movegen::flips(board, color, loc).count_occupied();
        if flips > most_flips {
            most_flips = flips;
            best = Move::Piece(loc);
        }
    }

    best
}

/// Reads moves from a line-oriented input: a square like `c4`, `pass`, or the
/// number of a move in the listed legal moves. Bad lines are re-prompted.
/// Once the input is closed every request is answered with a pass.
pub struct Human {
    input: Box<dyn BufRead>,
}

impl Human {
    pub fn new(input: impl BufRead + 'static) -> Self {
        Self {
            input: Box::new(input),
        }
    }

    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()))
    }

    fn read_move(&mut self, color: Color, legal: LocationList) -> Move {
        let mut line = String::new();

        loop {
            print!("{} > ", color);
            if let Err(err) = io::stdout().flush() {
                log::warn!("could not show the move prompt: {}", err);
            }

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    log::warn!("input closed, {} passes", color);
                    return Move::Pass;
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("could not read a move: {}", err);
                    return Move::Pass;
                }
            }

            match parse_choice(line.trim(), legal) {
                Some(mv) => return mv,
                None if legal.is_empty() => println!("no legal moves, enter `pass`"),
                None => println!("enter one of {} or its number", legal),
            }
        }
    }
}

impl fmt::Debug for Human {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Human").finish_non_exhaustive()
    }
}

/// Interpret one line of input; None unless it names a legal move.
fn parse_choice(text: &str, legal: LocationList) -> Option<Move> {
    if let Ok(number) = text.parse::<usize>() {
        let mut moves = legal;
        return number
            .checked_sub(1)
            .and_then(|index| moves.nth(index))
            .map(Move::Piece);
    }

    match text.parse::<Move>().ok()? {
        Move::Pass if legal.is_empty() => Some(Move::Pass),
        Move::Piece(loc) if legal.contains(loc) => Some(Move::Piece(loc)),
        _ => None,
    }
}

/// A strategy named in configuration or on the command line.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[display(fmt = "human")]
    Human,
    #[display(fmt = "random")]
    Random,
    #[display(fmt = "greedy")]
    Greedy,
    #[display(fmt = "alphabeta")]
    AlphaBeta,
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "unknown strategy, expected human, random, greedy or alphabeta")]
pub struct ParseStrategyError;

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(StrategyKind::Human),
            "random" => Ok(StrategyKind::Random),
            "greedy" => Ok(StrategyKind::Greedy),
            "alphabeta" | "alpha-beta" => Ok(StrategyKind::AlphaBeta),
            _ => Err(ParseStrategyError),
        }
    }
}

impl StrategyKind {
    /// Build the strategy. `seed` only matters for [`StrategyKind::Random`].
    pub fn build(
        self,
        search: SearchConfig,
        seed: u64,
    ) -> Result<Strategy, InvalidConfigurationError> {
        Ok(match self {
            StrategyKind::Human => Strategy::Human(Human::stdin()),
            StrategyKind::Random => Strategy::random(seed),
            StrategyKind::Greedy => Strategy::Greedy,
            StrategyKind::AlphaBeta => Strategy::alpha_beta(search)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_othello::Location;

    fn loc(s: &str) -> Location {
        s.parse().unwrap()
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn every_strategy_passes_without_moves() {
        // Black A1 B1, white C1: white is stuck.
        let board = board(&format!("XXO{}", ".".repeat(61)));
        let legal = board.legal_moves(Color::White);
        assert!(legal.is_empty());

        let mut strategies = vec![
            Strategy::random(1),
            Strategy::Greedy,
            Strategy::alpha_beta(SearchConfig::with_depth(2)).unwrap(),
            Strategy::Human(Human::new(&b"pass\n"[..])),
        ];
        for strategy in &mut strategies {
            assert_eq!(
                strategy.choose_move(&board, Color::White, legal),
                Move::Pass,
                "{}",
                strategy
            );
        }
    }

    #[test]
    fn random_stays_legal() {
        let mut strategy = Strategy::random(7);
        let board = Board::new();
        let legal = board.legal_moves(Color::Black);

        for _ in 0..20 {
            let mv = strategy.choose_move(&board, Color::Black, legal);
            assert!(legal.contains(mv.location().unwrap()));
        }
    }

    #[test]
    fn greedy_takes_the_most_flips() {
        // Black A1, white B1 C1 A2: D1 flips two, A3 flips one.
        let board = board(&format!("XOO.....O.......{}", ".".repeat(48)));
        let legal = board.legal_moves(Color::Black);
        assert!(legal.contains(loc("d1")));
        assert!(legal.contains(loc("a3")));

        let mv = Strategy::Greedy.choose_move(&board, Color::Black, legal);
        assert_eq!(mv, Move::Piece(loc("d1")));
    }

    #[test]
    fn greedy_breaks_ties_by_lowest_square() {
        let board = Board::new();
        let mv = Strategy::Greedy.choose_move(&board, Color::Black, board.legal_moves(Color::Black));
        assert_eq!(mv, Move::Piece(loc("d3")));
    }

    #[test]
    fn human_reprompts_until_a_legal_move() {
        let board = Board::new();
        let legal = board.legal_moves(Color::Black);
        let mut human = Strategy::Human(Human::new(&b"zz\n\nd4\npass\n9\nc4\n"[..]));

        assert_eq!(
            human.choose_move(&board, Color::Black, legal),
            Move::Piece(loc("c4"))
        );
    }

    #[test]
    fn human_picks_by_number() {
        let board = Board::new();
        let legal = board.legal_moves(Color::Black);
        let mut human = Strategy::Human(Human::new(&b"3\n"[..]));

        // Listed in square order: D3, C4, F5, E6.
        assert_eq!(
            human.choose_move(&board, Color::Black, legal),
            Move::Piece(loc("f5"))
        );
    }

    #[test]
    fn closed_input_passes() {
        let board = Board::new();
        let legal = board.legal_moves(Color::Black);
        let mut human = Strategy::Human(Human::new(io::empty()));
        assert_eq!(human.choose_move(&board, Color::Black, legal), Move::Pass);
    }

    #[test]
    fn parse_strategy_kind() {
        assert_eq!("Greedy".parse(), Ok(StrategyKind::Greedy));
        assert_eq!("alpha-beta".parse(), Ok(StrategyKind::AlphaBeta));
        assert_eq!("minimax".parse::<StrategyKind>(), Err(ParseStrategyError));
        assert_eq!(StrategyKind::AlphaBeta.to_string(), "alphabeta");
    }

    #[test]
    fn names_match_kinds() {
        let search = SearchConfig::with_depth(1);
        for kind in [StrategyKind::Random, StrategyKind::Greedy, StrategyKind::AlphaBeta] {
            let strategy = kind.build(search, 0).unwrap();
            assert_eq!(strategy.name(), kind.to_string());
            assert_eq!(strategy.to_string(), strategy.name());
        }
    }
}
