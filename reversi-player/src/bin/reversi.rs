use anyhow::{Context, Result};
use clap::Parser;
use reversi_player::{play_game, Config, ConsoleObserver, SilentObserver, StrategyKind};
use std::path::PathBuf;
use std::time::Duration;

/// Play Reversi in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with `[game]` and `[search]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strategy for black: human, random, greedy or alphabeta
    #[arg(long)]
    black: Option<StrategyKind>,

    /// Strategy for white: human, random, greedy or alphabeta
    #[arg(long)]
    white: Option<StrategyKind>,

    /// Deepest search, in plies
    #[arg(long)]
    depth: Option<u8>,

    /// Stop deepening the search after this many milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Seed for random strategies
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between displayed events, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print only the result
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Command-line flags win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(black) = self.black {
            config.game.black = black;
        }
        if let Some(white) = self.white {
            config.game.white = white;
        }
        if let Some(depth) = self.depth {
            config.search.max_depth = depth;
        }
        if let Some(time_ms) = self.time_ms {
            config.search.time_limit = Some(Duration::from_millis(time_ms));
        }
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.game.delay = Duration::from_millis(delay_ms);
        }
        config.game.quiet |= self.quiet;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config);
    config.search.validate().context("invalid search settings")?;

    let seed = config.game.seed.unwrap_or_else(rand::random);
    log::info!("random seed {}", seed);

    let mut black = config
        .game
        .black
        .build(config.search, seed)
        .context("failed to set up black")?;
    let mut white = config
        .game
        .white
        .build(config.search, seed.wrapping_add(1))
        .context("failed to set up white")?;

    log::info!("{} (black) vs {} (white)", black, white);

    if config.game.quiet {
        let outcome = play_game(&mut black, &mut white, &mut SilentObserver);
        println!("{}", outcome);
    } else {
        let mut console = ConsoleObserver::stdout(config.game.delay);
        play_game(&mut black, &mut white, &mut console);
    }

    Ok(())
}
