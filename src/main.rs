//! Debt Clock CLI
//!
//! Renders the debt clock in the terminal at a fixed frame rate. While it
//! runs, commands are read from stdin, one per line:
//!   +        increase the interest rate
//!   -        decrease the interest rate
//!   <number> move the rate slider to a value
//!   l        switch language
//!   h        show or hide the help text
//!   q        quit

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use debt_clock::rate_control::StepSize;
use debt_clock::{DebtClock, DebtConfig, Language, RenderSink, TerminalSink};

#[derive(Debug, Parser)]
#[command(name = "debt_clock", version, about = "French public debt in real time")]
struct Args {
    /// JSON file overriding the built-in baseline figures
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display language (fr or en)
    #[arg(long)]
    lang: Option<Language>,

    /// Starting interest rate in percent
    #[arg(long)]
    rate: Option<f64>,

    /// Step of the increase button (coarse or fine)
    #[arg(long)]
    up_step: Option<StepSize>,

    /// Step of the decrease button (coarse or fine)
    #[arg(long)]
    down_step: Option<StepSize>,

    /// Frames per second
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Render a single frame and exit
    #[arg(long)]
    once: bool,

    /// Append frames instead of redrawing, without colors
    #[arg(long)]
    plain: bool,
}

/// A line typed on stdin
#[derive(Debug, PartialEq)]
enum Command {
    StepUp,
    StepDown,
    ToggleLanguage,
    ToggleHelp,
    Quit,
    Rate(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let command = match line {
        "" => return None,
        "+" => Command::StepUp,
        "-" => Command::StepDown,
        "l" | "L" => Command::ToggleLanguage,
        "h" | "H" | "?" => Command::ToggleHelp,
        "q" | "Q" => Command::Quit,
        other => Command::Rate(other.to_string()),
    };
    Some(command)
}

/// Apply a command; returns false when the user asked to quit
fn handle_command<S: RenderSink>(clock: &mut DebtClock, command: Command, now: f64, sink: &mut S) -> Result<bool> {
    match command {
        Command::StepUp => {
            clock.step_up(now);
        }
        Command::StepDown => {
            clock.step_down(now);
        }
        Command::ToggleLanguage => clock.toggle_language(now, sink)?,
        Command::ToggleHelp => {
            if clock.help_open() {
                clock.close_help(sink)?;
            } else {
                clock.open_help(sink)?;
            }
        }
        Command::Rate(text) => clock.rate_input(text.as_str(), now),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn load_config(args: &Args) -> Result<DebtConfig> {
    let mut config = match &args.config {
        Some(path) => DebtConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DebtConfig::default_france(),
    };

    if let Some(lang) = args.lang {
        config.default_language = lang;
    }
    if let Some(rate) = args.rate {
        config.default_rate = rate;
    }
    if let Some(step) = args.up_step {
        config.rate_buttons.up = step;
    }
    if let Some(step) = args.down_step {
        config.rate_buttons.down = step;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let ansi = !args.plain && io::stdout().is_terminal();
    let mut sink = TerminalSink::new(io::stdout(), ansi);
    let mut clock = DebtClock::start(config, Utc::now(), &mut sink).context("Failed to start debt clock")?;
    if let Some(rate) = clock.formatter().exchange_rate_label() {
        info!("English amounts converted at {rate} per euro");
    }

    // Frame timestamps are milliseconds since startup
    let origin = Instant::now();
    let elapsed_ms = || origin.elapsed().as_secs_f64() * 1000.0;

    if args.once {
        clock.frame(elapsed_ms(), &mut sink)?;
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1))));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let stop_at = args.duration.map(|secs| origin + Duration::from_secs(secs));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                clock.frame(elapsed_ms(), &mut sink)?;
                if stop_at.is_some_and(|stop| Instant::now() >= stop) {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read stdin")? {
                    Some(line) => {
                        if let Some(command) = parse_command(&line) {
                            if !handle_command(&mut clock, command, elapsed_ms(), &mut sink)? {
                                break;
                            }
                        }
                    }
                    None => stdin_open = false,
                }
            }
        }
    }

    info!("rendered {} frames", clock.frames_rendered());
    Ok(())
}
