use crate::observer::{GameEvent, Observer};
use crate::strategy::Strategy;
use reversi_othello::{Color, Game, Outcome};

/// Play a game from the opening position. See [`play_from`].
pub fn play_game(
    black: &mut Strategy,
    white: &mut Strategy,
    observer: &mut impl Observer,
) -> Outcome {
    play_from(Game::default(), black, white, observer)
}

/// Play `game` to the end, asking each side's strategy for its moves.
/// A strategy that answers with an illegal move fouls and loses on the spot.
/// The last event sent to `observer` is always a single `Finished`.
pub fn play_from(
    mut game: Game,
    black: &mut Strategy,
    white: &mut Strategy,
    observer: &mut impl Observer,
) -> Outcome {
    observer.notify(&GameEvent::Started {
        board: game.board,
        black: black.name(),
        white: white.name(),
    });

    let outcome = loop {
        if let Some(outcome) = game.outcome() {
            break outcome;
        }

        let color = game.active;
        let legal = game.legal_moves();
        observer.notify(&GameEvent::Turn { color, legal });

        let strategy = match color {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let mv = strategy.choose_move(&game.board, color, legal);

        match game.apply(mv) {
            Ok(next) => {
                game = next;
                observer.notify(&GameEvent::Moved {
                    color,
                    mv,
                    board: game.board,
                });
            }
            Err(err) => {
                log::warn!("{} ({}) fouls: {}", color, strategy, err);
                observer.notify(&GameEvent::Foul { color });
                break Outcome::Win(!color);
            }
        }
    };

    log::info!("game over: {}", outcome);
    observer.notify(&GameEvent::Finished(outcome));
    outcome
}
