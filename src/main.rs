use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{self, Event};
use retro_snake::config::{GameConfig, Theme, theme_by_name};
use retro_snake::game::{Engine, GameStatus};
use retro_snake::input::{GameInput, map_key};
use retro_snake::renderer;
use retro_snake::scheduler::TickScheduler;
use retro_snake::score::{HighScoreStore, JsonFileStore, MemoryStore};
use retro_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use retro_snake::ui::hud::HudInfo;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Longest wait for input before the frame is redrawn.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding board size, speeds and scoring.
    #[arg(long)]
    config: Option<PathBuf>,

    /// High score file (defaults to the per-user data directory).
    #[arg(long, conflicts_with = "no_save")]
    scores: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long)]
    no_save: bool,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme: classic or ocean.
    #[arg(long, default_value = "classic")]
    theme: String,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let Some(theme) = theme_by_name(&cli.theme) else {
        bail!("unknown theme {:?}", cli.theme);
    };

    let engine = match cli.seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    }
    .context("invalid game configuration")?;

    let mut store: Box<dyn HighScoreStore> = if cli.no_save {
        Box::new(MemoryStore::default())
    } else {
        let file_store = match cli.scores {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::at_default_location(),
        };
        info!(path = %file_store.path().display(), "using score file");
        Box::new(file_store)
    };

    install_panic_hook();
    run(engine, store.as_mut(), theme)
}

fn run(mut engine: Engine, store: &mut dyn HighScoreStore, theme: &Theme) -> Result<()> {
    let mut session = TerminalSession::enter().context("failed to set up the terminal")?;
    let mut scheduler = TickScheduler::new();
    let mut state = engine.initial_state(&*store);
    let mut reference_high_score = state.high_score;

    info!(high_score = state.high_score, "session started");

    loop {
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &state,
                engine.config(),
                HudInfo {
                    reference_high_score,
                    theme,
                },
            )
        })?;

        let timeout = scheduler
            .time_until_next(Instant::now(), state.speed_ms)
            .map_or(FRAME_INTERVAL, |left| left.min(FRAME_INTERVAL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(GameInput::Quit) => break,
                    Some(input) => state = engine.handle_input(state, input, &*store),
                    None => {}
                }
            }
        }

        if scheduler.poll(Instant::now(), state.status, state.speed_ms) {
            state = engine.tick(state, &mut *store);
        }

        if state.status != GameStatus::GameOver {
            reference_high_score = state.high_score;
        }
    }

    info!(high_score = store.high_score(), "session ended");
    Ok(())
}

/// Logs go to a file because the terminal is owned by the game screen.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
