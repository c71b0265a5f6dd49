//! Outbound notifications about a game in progress.

use reversi_othello::{Board, Color, LocationList, Move, Outcome};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// Something that happened in a game, in the order it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A game begins on `board`; `black` and `white` name the strategies.
    Started {
        board: Board,
        black: &'static str,
        white: &'static str,
    },
    /// `color` is about to choose among `legal`; empty means a forced pass.
    Turn { color: Color, legal: LocationList },
    /// `color` played `mv`, leaving `board`.
    Moved { color: Color, mv: Move, board: Board },
    /// `color` chose an illegal move and forfeits.
    Foul { color: Color },
    Finished(Outcome),
}

/// Receives game events. Called synchronously by the game loop.
pub trait Observer {
    fn notify(&mut self, event: &GameEvent);
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentObserver;

impl Observer for SilentObserver {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Records every event.
impl Observer for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

/// Prints a game as text: score line and board after every move, the legal
/// moves on each turn, and the result.
pub struct ConsoleObserver<W = Stdout> {
    out: W,
    /// Strategy names from the last `Started` event.
    names: [&'static str; 2],
    /// Pause after announcing a turn and after showing a move.
    delay: Duration,
}

impl ConsoleObserver {
    pub fn stdout(delay: Duration) -> Self {
        Self::new(io::stdout(), delay)
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self {
            out,
            names: ["", ""],
            delay,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: &GameEvent) -> io::Result<()> {
        match *event {
            GameEvent::Started {
                board,
                black,
                white,
            } => {
                self.names = [black, white];
                self.progress(board)?;
            }
            GameEvent::Turn { color, legal } => {
                writeln!(self.out, "{}'s turn", color)?;
                for (number, loc) in legal.enumerate() {
                    writeln!(self.out, "{:2}: {}", number + 1, loc)?;
                }
                self.out.flush()?;
                self.pause();
            }
            GameEvent::Moved { color, mv, board } => {
                match mv {
                    Move::Piece(loc) => writeln!(self.out, "played on {}", loc)?,
                    Move::Pass => writeln!(self.out, "{} passes", color)?,
                }
                writeln!(self.out)?;
                self.out.flush()?;
                self.pause();
                self.progress(board)?;
            }
            GameEvent::Foul { color } => writeln!(self.out, "{} foul", color)?,
            GameEvent::Finished(outcome) => writeln!(self.out, "{}", outcome)?,
        }

        self.out.flush()
    }

    fn progress(&mut self, board: Board) -> io::Result<()> {
        let [black, white] = self.names;
        writeln!(
            self.out,
            "{}({}):{} {}({}):{}",
            Color::Black,
            black,
            board.disc_count(Color::Black),
            Color::White,
            white,
            board.disc_count(Color::White)
        )?;
        writeln!(self.out, "{}", board)
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl<W: Write> Observer for ConsoleObserver<W> {
    fn notify(&mut self, event: &GameEvent) {
        if let Err(err) = self.render(event) {
            log::warn!("could not display game event: {}", err);
        }
    }
}
