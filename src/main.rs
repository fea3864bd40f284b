// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tagpick CLI entrypoint.
//!
//! By default this runs the interactive TUI, prefilled with any positional choices. `--once` runs
//! a single headless selection and prints the winner to stdout.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use tagpick::config::{AppConfig, CONFIG_ENV};
use tagpick::engine::driver::run_to_completion;
use tagpick::engine::SelectionEngine;
use tagpick::error::{PickerError, Result};
use tagpick::model::Delimiter;
use tagpick::registry::ItemRegistry;
use tagpick::tui::{self, TuiOptions};

const LOG_ENV: &str = "TAGPICK_LOG";
const DEFAULT_LOG_FILE: &str = "tagpick.log";
const EXIT_NOTHING_TO_PICK: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "tagpick", author, version, about = "Pick a random choice from a delimited list")]
struct Cli {
    /// Initial choices. Multiple arguments are joined with the active delimiter.
    items: Vec<String>,

    /// Character that separates choices: space, comma or period.
    #[arg(short, long, value_name = "DELIM")]
    delimiter: Option<Delimiter>,

    /// Milliseconds between highlight ticks.
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Number of highlight ticks before the final pick.
    #[arg(long, value_name = "N")]
    ticks: Option<u32>,

    /// Seed for a reproducible sequence of picks.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file.
    #[arg(short, long, env = CONFIG_ENV, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run one selection without the TUI and print the winner.
    #[arg(long)]
    once: bool,

    /// Log file for TUI mode (defaults to tagpick.log in the temp dir).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("tagpick: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Holds the non-blocking writer open until exit.
    let _log_guard = if cli.once {
        init_stderr_logging();
        None
    } else {
        Some(init_file_logging(cli.log_file.as_deref())?)
    };

    let config = resolve_config(&cli)?;
    let text = initial_text(&cli.items, config.delimiter);

    if cli.once {
        return run_once(&text, &config, cli.seed);
    }

    tui::run(TuiOptions {
        initial_text: text,
        delimiter: config.delimiter,
        selection: config.selection_config(),
        seed: cli.seed,
    })?;
    Ok(ExitCode::SUCCESS)
}

fn run_once(text: &str, config: &AppConfig, seed: Option<u64>) -> Result<ExitCode> {
    let mut registry = ItemRegistry::new(config.delimiter);
    registry.set_text(text);
    if registry.items().is_empty() {
        eprintln!("tagpick: nothing to pick from");
        return Ok(ExitCode::from(EXIT_NOTHING_TO_PICK));
    }

    let selection = config.selection_config();
    let mut engine = match seed {
        Some(seed) => SelectionEngine::seeded(selection, seed),
        None => SelectionEngine::new(selection),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(PickerError::Runtime)?;
    let outcome = runtime.block_on(run_to_completion(&mut engine, &mut registry));

    let label = outcome
        .and_then(|outcome| outcome.winner)
        .and_then(|winner| registry.label(winner));
    match label {
        Some(label) => {
            println!("{}", label.trim());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("tagpick: nothing to pick from");
            Ok(ExitCode::from(EXIT_NOTHING_TO_PICK))
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.selection.tick_interval_ms = tick_ms;
    }
    if let Some(ticks) = cli.ticks {
        config.selection.tick_count = ticks;
    }
    config.validate()?;
    Ok(config)
}

fn initial_text(items: &[String], delimiter: Delimiter) -> String {
    let separator = delimiter.character().to_string();
    items.join(separator.as_str())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_logging(path: Option<&Path>) -> Result<WorkerGuard> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| PickerError::Logging(format!("{}: {err}", path.display())))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| PickerError::Logging(err.to_string()))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::{initial_text, resolve_config, Cli};
    use clap::{CommandFactory, Parser};
    use std::time::Duration;
    use tagpick::error::PickerError;
    use tagpick::model::Delimiter;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_items_and_flags() {
        let cli = Cli::try_parse_from([
            "tagpick",
            "a,b",
            "c",
            "--delimiter",
            ",",
            "--tick-ms",
            "20",
            "--ticks",
            "5",
            "--seed",
            "9",
            "--once",
        ])
        .expect("parse");

        assert_eq!(cli.items, vec!["a,b", "c"]);
        assert_eq!(cli.delimiter, Some(Delimiter::Comma));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.once);

        let config = resolve_config(&cli).expect("config");
        assert_eq!(config.delimiter, Delimiter::Comma);
        let selection = config.selection_config();
        assert_eq!(selection.tick_interval, Duration::from_millis(20));
        assert_eq!(selection.tick_count, 5);
    }

    #[test]
    fn rejects_unknown_delimiter() {
        let err = Cli::try_parse_from(["tagpick", "--delimiter", "semicolon"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn zero_tick_interval_is_a_config_error() {
        let cli = Cli::try_parse_from(["tagpick", "--tick-ms", "0"]).expect("parse");
        let err = resolve_config(&cli).unwrap_err();
        assert!(matches!(err, PickerError::Config(_)), "got: {err:?}");
    }

    #[test]
    fn positional_items_join_with_active_delimiter() {
        let items = vec!["red".to_owned(), "green blue".to_owned()];
        assert_eq!(initial_text(&items, Delimiter::Comma), "red,green blue");
        assert_eq!(initial_text(&items, Delimiter::Space), "red green blue");
        assert_eq!(initial_text(&[], Delimiter::Period), "");
    }
}
