//! Playing whole games of Reversi: strategies, the game loop, and observers
//! that render what happens.

pub mod config;
pub mod observer;
mod play;
pub mod strategy;

pub use config::{Config, ConfigError, GameConfig};
pub use observer::{ConsoleObserver, GameEvent, Observer, SilentObserver};
pub use play::{play_from, play_game};
pub use strategy::{Human, ParseStrategyError, Strategy, StrategyKind};
