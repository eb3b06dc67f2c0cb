use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::tty::IsTty;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use hjkl_snake::config::{Config, DEFAULT_HEIGHT, DEFAULT_SPEED, DEFAULT_WIDTH};
use hjkl_snake::game::{Game, GameOver};
use hjkl_snake::input::{ByteKeys, InputListener, TerminalKeys};
use hjkl_snake::scheduler::{Outcome, TickScheduler};
use hjkl_snake::term::TermManager;

const KEY_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "hjkl-snake", about = "Snake on a character grid. Steer with h/j/k/l, quit with q")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Tick rate multiplier, 1.0 is four moves a second
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f64,

    /// Seed for food placement, for replayable games
    #[arg(long)]
    seed: Option<u64>,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let code = match play(&args) {
        Ok(Outcome::Quit) => 0,
        Ok(Outcome::GameOver(reason)) if reason.is_win() => 0,
        Ok(Outcome::GameOver(_)) => 1,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        },
    };

    // The terminal has been restored by now, whichever way play() returned
    exit(code);
}

fn play(args: &Args) -> anyhow::Result<Outcome> {
    let config = Config::new(args.width, args.height, args.speed, args.seed)
        .context("invalid arguments")?;

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    log::info!("starting {}x{} game at speed {}", config.width(), config.height(), config.speed());

    let mut game = Game::new(&config);
    let (intents_tx, intents_rx) = crossbeam_channel::unbounded();
    let shutdown = Arc::new(AtomicBool::new(false));

    let mut term = TermManager::stdout();
    term.setup().context("could not put the terminal in raw mode")?;

    // A plain byte stream cannot be interrupted, so that listener is left to
    // die with the process instead of being joined.
    let listener = if io::stdin().is_tty() {
        let keys = TerminalKeys::new(KEY_POLL_INTERVAL);
        Some(InputListener::new(keys, intents_tx, Arc::clone(&shutdown)).spawn())
    } else {
        let keys = ByteKeys::new(io::stdin());
        InputListener::new(keys, intents_tx, Arc::clone(&shutdown)).spawn();
        None
    };

    let outcome = TickScheduler::new(intents_rx, config.tick_interval())
        .run(&mut game, &mut term)
        .context("could not draw the board");
    shutdown.store(true, Ordering::Relaxed);
    let outcome = outcome?;

    let length = format!("Length: {}", game.snake().len());
    match outcome {
        Outcome::Quit => term.show_message(&["Bye!"])?,
        Outcome::GameOver(GameOver::BoardFull) => term.show_message(&["You won!", &length])?,
        Outcome::GameOver(reason) => {
            let why = match reason {
                GameOver::SelfCollision => "Game over! You bit yourself.",
                _ => "Game over! You hit the wall.",
            };
            term.show_message(&[why, &length])?
        },
    }
    term.restore().context("could not restore the terminal")?;

    if let Some(handle) = listener {
        let _ = handle.join();
    }

    log::info!("finished: {:?}", outcome);
    Ok(outcome)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let log_file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    WriteLogger::init(LevelFilter::Debug, log_config, log_file)?;
    Ok(())
}
