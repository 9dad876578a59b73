use std::{path::PathBuf, process::ExitCode};

use app::App;
use clap::Parser;
use gomoku_replay::{Mode, Pipeline, ReplayConfig, ReplayError, Skip, Tick};
use itertools::Itertools;
use logging::{LogLevel, Sink};

pub mod app;
pub mod board;
pub mod logging;
pub mod moves;
pub mod status;

/// Replays a gomoku game from the board log written by the engine.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board log to follow.
    #[arg(default_value = "board.log")]
    log: PathBuf,
    /// RON config file; flags below override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Only track the most recent board.
    #[arg(long)]
    latest: bool,
    /// Poll interval in milliseconds.
    #[arg(long, value_name = "MS")]
    interval: Option<u64>,
    /// Start browsing instead of following new moves.
    #[arg(long)]
    no_follow: bool,
    /// Where `s` saves the history.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
    /// Print the reconstructed history once and exit.
    #[arg(long)]
    dump: bool,
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

impl Cli {
    fn replay_config(&self) -> Result<ReplayConfig, ReplayError> {
        let mut config = match &self.config {
            Some(path) => ReplayConfig::load(path)?,
            None => ReplayConfig::default(),
        };
        if self.latest {
            config.mode = Mode::Latest;
        }
        if let Some(interval) = self.interval {
            config.poll_interval_ms = interval;
        }
        if self.no_follow {
            config.follow_live = false;
        }
        if let Some(export) = &self.export {
            config.export_path.clone_from(export);
        }
        Ok(config)
    }
}

fn dump(pipeline: &Pipeline) -> ExitCode {
    let mut state = pipeline.new_state();
    match pipeline.tick(&mut state) {
        Tick::TransientFailure(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        Tick::NoUpdate(Skip::Missing) => {
            eprintln!("no log at {}", pipeline.path().display());
            return ExitCode::FAILURE;
        }
        _ => {}
    }
    let text = state
        .history()
        .iter()
        .map(|m| format!("[{}] {}\n{}", m.seq, m.descriptor, m.board))
        .join("\n");
    println!("{text}");
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs when given a file.
    let sink = match (&cli.log_file, cli.dump) {
        (Some(path), _) => Some(Sink::File(path)),
        (None, true) => Some(Sink::Stderr),
        (None, false) => None,
    };
    if let Some(sink) = sink {
        if let Err(e) = logging::init(cli.log_level, sink) {
            eprintln!("cannot open log file: {e}");
            return ExitCode::FAILURE;
        }
    }

    let config = match cli.replay_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let pipeline = Pipeline::new(cli.log, config);
    if cli.dump {
        return dump(&pipeline);
    }

    let terminal = ratatui::init();
    let result = App::new(pipeline).run(terminal);
    ratatui::restore();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
