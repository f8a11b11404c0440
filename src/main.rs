//! Torus Rocks entry point
//!
//! Console driver: reads one command per line from stdin, ticks the
//! simulation, prints the snapshot. Owns the loop and the exit code.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use torus_rocks::sim::{Command, GameEvent, GameState, TickOutcome, tick};
use torus_rocks::{FirePolicy, Settings, clock_seed, seeded_rng};

/// Asteroids on a wrapped plane, one command per tick
#[derive(Parser)]
#[command(name = "torus-rocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the fire policy
    #[arg(long, value_enum)]
    fire_policy: Option<FirePolicy>,

    /// Print snapshots as JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Clear the terminal before each frame
    #[arg(long)]
    clear: bool,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(policy) = cli.fire_policy {
        settings.fire_policy = policy;
    }
    Ok(settings)
}

/// Decode one raw input line. Only the first byte matters; anything that is
/// not a known key, including non-UTF-8 noise, is a no-op.
fn command_from_line(line: &[u8]) -> Command {
    match line.first() {
        Some(&byte) if byte.is_ascii() => Command::from_key(char::from(byte)),
        _ => Command::NoOp,
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ShipDestroyed | GameEvent::HyperspaceFailed => {
                log::info!("{event:?}")
            }
            _ => log::debug!("{event:?}"),
        }
    }
}

fn render(state: &GameState, cli: &Cli, out: &mut impl Write) -> Result<()> {
    let snapshot = state.snapshot();
    if cli.json {
        let line = serde_json::to_string(&snapshot)?;
        writeln!(out, "{line}")?;
    } else {
        if cli.clear {
            write!(out, "\x1B[2J\x1B[H")?;
        }
        write!(out, "{snapshot}")?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<u64> {
    let settings = load_settings(cli)?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut rng = seeded_rng(seed);
    let mut state = GameState::new(settings, &mut rng)?;
    log::info!("Game initialized with seed: {}", seed);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut line = Vec::new();

    loop {
        if cli.max_ticks.is_some_and(|max| state.time_ticks >= max) {
            log::info!("Tick limit reached");
            break;
        }

        if !cli.json {
            write!(out, "Enter command (A/D/W/S/Space/Q): ")?;
            out.flush()?;
        }
        line.clear();
        let command = match input.read_until(b'\n', &mut line).context("reading command")? {
            0 => Command::Quit,
            _ => command_from_line(&line),
        };

        let outcome = tick(&mut state, command, &mut rng);
        log_events(&state.events);
        match outcome {
            TickOutcome::Continue => render(&state, cli, &mut out)?,
            TickOutcome::GameOver => {
                render(&state, cli, &mut out)?;
                break;
            }
            TickOutcome::Quit => break,
        }
    }

    Ok(state.score)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::info!("Torus Rocks starting...");

    match run(&cli) {
        Ok(score) => {
            println!("Game Over! Final Score: {score}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
