//! Reproducible positions for tests and benchmarks, built by random play.

use crate::game::Game;
use crate::location::Move;
use rand::seq::SliceRandom;
use rand::Rng;

/// Play up to `plies` uniformly random actions from the opening.
/// Stops early if the game ends.
pub fn random_game<R: Rng>(rng: &mut R, plies: usize) -> Game {
    let mut game = Game::default();

    for _ in 0..plies {
        if game.is_finished() {
            break;
        }

        let actions = game.actions();
        let mv = *actions.choose(rng).unwrap_or(&Move::Pass);
        game = match game.apply(mv) {
            Ok(next) => next,
            Err(_) => break,
        };
    }

    game
}

/// Collect `count` distinct unfinished positions, each `plies` random plies deep.
pub fn midgame_positions<R: Rng>(rng: &mut R, count: usize, plies: usize) -> Vec<Game> {
    let mut positions: Vec<Game> = Vec::with_capacity(count);

    while positions.len() < count {
        let game = random_game(rng, plies);
        if !game.is_finished() && !positions.contains(&game) {
            positions.push(game);
        }
    }

    positions
}
