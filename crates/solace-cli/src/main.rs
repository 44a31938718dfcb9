//! Solace - mood and crisis detection from the command line.
//!
//! Prints JSON on stdout. Logs go to a daily rolling file under the user's
//! data directory, and to stderr with `--debug`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use solace_cli::{run, Command};
use solace_core::EngineConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Solace - mood and crisis detection for support conversations
#[derive(Parser, Debug)]
#[command(name = "solace", version, about)]
struct Args {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

/// Get the logs directory path.
fn logs_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "solace", "Solace").map(|dirs| dirs.data_dir().join("logs"))
}

/// Initialize logging with file rotation.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solace={},warn", log_level)));

    if let Some(log_dir) = logs_dir() {
        if std::fs::create_dir_all(&log_dir).is_ok() {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("solace")
                .filename_suffix("log")
                .build(&log_dir)
                .ok();

            if let Some(appender) = file_appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                // stdout carries the JSON result, so the console layer uses stderr
                if args.debug {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(std::io::stderr))
                        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                        .init();
                }

                tracing::debug!("Logging to {:?}", log_dir);
                return Some(guard);
            }
        }
    }

    // Fallback: console logging only
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::warn!("File logging unavailable, using console only");
    None
}

/// Load the engine config, falling back to defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            tracing::info!(path = %path.display(), "Loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = init_logging(&args);

    let config = load_config(args.config.as_deref())?;
    let output = run(&args.command, &config, args.compact)?;
    println!("{output}");

    Ok(())
}
