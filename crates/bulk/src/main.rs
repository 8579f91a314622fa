//! Bulk - batch stdin commands and fan them out
//!
//! # Usage
//!
//! ```bash
//! # Bulks of 3 commands, files in the current directory
//! seq 10 | bulk
//!
//! # Bulks of 5, files under logs/
//! bulk 5 --output-dir logs < commands.txt
//!
//! # Settings from a config file, CLI flags win
//! bulk --config bulk.toml --log-level debug < commands.txt
//! ```

mod ingest;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bulk_config::{Config, LogLevel};
use bulk_pipeline::{ConsoleConfig, DualFileConfig, SessionOptions};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default read size for stdin chunks
const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Bulk - batch stdin commands and fan them out to console and files
#[derive(Parser, Debug)]
#[command(name = "bulk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Commands per bulk. Overrides config file.
    bulk_size: Option<usize>,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long)]
    log_level: Option<LogLevel>,

    /// Bytes read from stdin per receive call
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Directory for bulk files. Overrides config file.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    anyhow::ensure!(cli.chunk_size > 0, "--chunk-size must be at least 1");

    let config = load_config(cli.config.as_deref())?;
    init_logging(resolve_log_level(cli.log_level, &config))?;

    let options = session_options(&cli, &config);
    let report = ingest::run(options, io::stdin().lock(), cli.chunk_size)?;

    println!("{report}");
    Ok(())
}

/// Load the config file if one was given, defaults otherwise
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<LogLevel>, config: &Config) -> LogLevel {
    cli_level.unwrap_or(config.log.level)
}

/// Merge CLI overrides onto the config file settings
fn session_options(cli: &Cli, config: &Config) -> SessionOptions {
    let bulk_size = cli.bulk_size.unwrap_or(config.session.bulk_size);
    let path = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.sinks.file.path.clone());

    SessionOptions::new(bulk_size)
        .with_console(ConsoleConfig {
            color: config.sinks.console.color,
        })
        .with_file(DualFileConfig::default().with_path(path))
}

/// Initialize the tracing subscriber, writing to stderr
fn init_logging(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_new(level.as_str())
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_names(true),
        )
        .with(filter)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bulk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.bulk_size, None);
        assert_eq!(cli.chunk_size, DEFAULT_CHUNK_SIZE);

        let options = session_options(&cli, &Config::default());
        assert_eq!(options.bulk_size, bulk_config::DEFAULT_BULK_SIZE);
        assert_eq!(options.file.path, PathBuf::from("."));
        assert!(!options.console.color);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config::from_str(
            "[session]\nbulk_size = 9\n[sinks.file]\npath = \"cfg\"\n[sinks.console]\ncolor = true",
        )
        .unwrap();
        let cli = cli(&["4", "--output-dir", "out", "--chunk-size", "1"]);

        let options = session_options(&cli, &config);
        assert_eq!(options.bulk_size, 4);
        assert_eq!(options.file.path, PathBuf::from("out"));
        assert!(options.console.color);
        assert_eq!(cli.chunk_size, 1);
    }

    #[test]
    fn test_config_used_without_overrides() {
        let config = Config::from_str("[session]\nbulk_size = 9").unwrap();
        let options = session_options(&cli(&[]), &config);
        assert_eq!(options.bulk_size, 9);
    }

    #[test]
    fn test_log_level_precedence() {
        let config = Config::from_str("[log]\nlevel = \"warn\"").unwrap();
        assert_eq!(
            resolve_log_level(Some(LogLevel::Trace), &config),
            LogLevel::Trace
        );
        assert_eq!(resolve_log_level(None, &config), LogLevel::Warn);
        assert_eq!(resolve_log_level(None, &Config::default()), LogLevel::Info);
    }

    #[test]
    fn test_log_level_flag_is_validated() {
        assert_eq!(cli(&["--log-level", "debug"]).log_level, Some(LogLevel::Debug));
        assert_eq!(cli(&["-l", "ERROR"]).log_level, Some(LogLevel::Error));
        assert!(Cli::try_parse_from(["bulk", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let path = std::path::Path::new("/definitely/not/here/bulk.toml");
        assert!(load_config(Some(path)).is_err());
        assert!(load_config(None).is_ok());
    }

    #[test]
    fn test_non_numeric_bulk_size_rejected() {
        assert!(Cli::try_parse_from(["bulk", "three"]).is_err());
    }
}
