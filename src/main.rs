//! Terminal runner (default binary).
//!
//! Interactive mode drives the engine from crossterm key events and a
//! [`GameDriver`] tick cadence. `--headless <ticks>` plays a scripted-random
//! game without a terminal and prints the final snapshot as JSON.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_blockfall::core::{EngineConfig, GameEngine, GameSnapshot, PieceSource, SimpleRng};
use tui_blockfall::driver::GameDriver;
use tui_blockfall::input::{handle_key_event, should_quit, should_restart};
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::Command;

/// How long to wait for input when no tick is pending (after game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(version, about = "Falling-block puzzle in the terminal")]
struct Args {
    /// JSON file with engine settings; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for piece selection (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Run this many ticks without a terminal and print the final state
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,

    /// Write logs here (RUST_LOG picks the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let engine = GameEngine::new(config, seed).context("invalid engine configuration")?;
    info!(
        "starting {}x{} game with seed {}",
        engine.grid().width(),
        engine.grid().height(),
        seed
    );

    if let Some(ticks) = args.headless {
        return run_headless(engine, seed, ticks);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut driver = GameDriver::new(engine, Instant::now());
    let result = run(&mut term, &mut driver);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // Stderr is the TUI, so logging stays off unless it has a file to go to.
    let Some(path) = log_file else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<EngineConfig>(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or_else(|| clamp_cells(config.grid_width()));
        let height = args.height.unwrap_or_else(|| clamp_cells(config.grid_height()));
        config = config.resized(width, height);
    }
    Ok(config)
}

fn clamp_cells(n: u32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run_headless<S: PieceSource>(mut engine: GameEngine<S>, seed: u32, ticks: u32) -> Result<()> {
    const COMMANDS: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop,
    ];
    let mut rng = SimpleRng::new(seed ^ 0x9e37_79b9);

    let mut played = 0;
    while played < ticks && !engine.is_game_over() {
        // Roughly one command per tick, sometimes none.
        let pick = rng.next_range(COMMANDS.len() as u32 + 1) as usize;
        if let Some(&command) = COMMANDS.get(pick) {
            engine.apply(command);
        }
        engine.tick();
        played += 1;
    }
    info!("headless run finished after {} ticks", played);

    let json = serde_json::to_string_pretty(&engine.snapshot())?;
    println!("{json}");
    Ok(())
}

fn run<S: PieceSource>(term: &mut TerminalRenderer, driver: &mut GameDriver<S>) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if driver.pump(Instant::now()).is_some() {
            dirty = true;
        }

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            driver.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = driver
            .time_until_tick(Instant::now())
            .unwrap_or(IDLE_POLL);
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    driver.teardown();
                    return Ok(());
                }
                if should_restart(key) {
                    driver.restart(Instant::now());
                    dirty = true;
                } else if let Some(command) = handle_key_event(key) {
                    dirty |= driver.dispatch(command, Instant::now());
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
