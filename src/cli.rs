//! Command-line interface parsing for the daily quote widget
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a validated `StartupConfig`.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::cache::QuoteStore;
use crate::data::DayKey;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The `--date` value is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The `--position` value is not `X,Y`
    #[error("Invalid position: '{0}'. Expected X,Y with non-negative integers")]
    InvalidPosition(String),

    /// No `--data-file` given and no home directory to default to
    #[error("Cannot determine home directory; pass --data-file")]
    NoHomeDirectory,
}

/// Daily Quote - one motivational quote per day
#[derive(Parser, Debug)]
#[command(name = "daily-quote")]
#[command(about = "Shows one motivational quote per day")]
#[command(version)]
pub struct Cli {
    /// Print today's quote and exit instead of opening the panel
    #[arg(long)]
    pub print: bool,

    /// With --print, write the quote as JSON
    #[arg(long, requires = "print")]
    pub json: bool,

    /// Never contact the quote service; use the built-in quotes on a cache miss
    #[arg(long)]
    pub offline: bool,

    /// Resolve the quote for this day (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Location of the cached quote file
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Initial panel position inside the terminal, as X,Y
    #[arg(long, value_name = "X,Y")]
    pub position: Option<String>,
}

/// How the program presents the quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Interactive terminal panel
    #[default]
    Panel,
    /// One line of text on stdout
    Text,
    /// JSON object on stdout
    Json,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: OutputMode,
    /// Store backing the resolver
    pub store: QuoteStore,
    /// Skip the remote source entirely
    pub offline: bool,
    /// Fixed day to resolve for, if any
    pub day: Option<DayKey>,
    /// Initial panel position; `None` places it at the top-right corner
    pub position: Option<(u16, u16)>,
}

/// Parses a `YYYY-MM-DD` argument into a day key
pub fn parse_date_arg(s: &str) -> Result<DayKey, CliError> {
    s.parse().map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an `X,Y` argument into a panel position
pub fn parse_position_arg(s: &str) -> Result<(u16, u16), CliError> {
    let invalid = || CliError::InvalidPosition(s.to_string());
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a value is malformed or no data location is known
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mode = match (cli.print, cli.json) {
            (false, _) => OutputMode::Panel,
            (true, false) => OutputMode::Text,
            (true, true) => OutputMode::Json,
        };

        let store = match &cli.data_file {
            Some(path) => QuoteStore::with_path(path.clone()),
            None => QuoteStore::new().ok_or(CliError::NoHomeDirectory)?,
        };

        let day = cli.date.as_deref().map(parse_date_arg).transpose()?;
        let position = cli.position.as_deref().map(parse_position_arg).transpose()?;

        Ok(StartupConfig {
            mode,
            store,
            offline: cli.offline,
            day,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg_valid() {
        let day = parse_date_arg("2024-03-15").unwrap();
        assert_eq!(day.to_string(), "2024-03-15");
    }

    #[test]
    fn test_parse_date_arg_invalid() {
        let result = parse_date_arg("15/03/2024");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(err.to_string().contains("15/03/2024"));
    }

    #[test]
    fn test_parse_position_arg() {
        assert_eq!(parse_position_arg("10,4").unwrap(), (10, 4));
        assert_eq!(parse_position_arg(" 3 , 7 ").unwrap(), (3, 7));
    }

    #[test]
    fn test_parse_position_arg_invalid() {
        assert!(parse_position_arg("10").is_err());
        assert!(parse_position_arg("-1,4").is_err());
        assert!(parse_position_arg("a,b").is_err());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["daily-quote"]);
        assert!(!cli.print);
        assert!(!cli.json);
        assert!(!cli.offline);
        assert!(cli.date.is_none());
    }

    #[test]
    fn test_cli_json_requires_print() {
        assert!(Cli::try_parse_from(["daily-quote", "--json"]).is_err());
        assert!(Cli::try_parse_from(["daily-quote", "--print", "--json"]).is_ok());
    }

    #[test]
    fn test_startup_config_defaults_to_panel() {
        let cli = Cli::parse_from(["daily-quote", "--data-file", "/tmp/q.json"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, OutputMode::Panel);
        assert_eq!(config.position, None);
        assert!(config.day.is_none());
        assert_eq!(config.store.path(), PathBuf::from("/tmp/q.json").as_path());
    }

    #[test]
    fn test_startup_config_print_modes() {
        let cli = Cli::parse_from(["daily-quote", "--print", "--data-file", "/tmp/q.json"]);
        assert_eq!(StartupConfig::from_cli(&cli).unwrap().mode, OutputMode::Text);

        let cli = Cli::parse_from([
            "daily-quote",
            "--print",
            "--json",
            "--data-file",
            "/tmp/q.json",
        ]);
        assert_eq!(StartupConfig::from_cli(&cli).unwrap().mode, OutputMode::Json);
    }

    #[test]
    fn test_startup_config_with_date_and_position() {
        let cli = Cli::parse_from([
            "daily-quote",
            "--offline",
            "--date",
            "2024-03-15",
            "--position",
            "5,6",
            "--data-file",
            "/tmp/q.json",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.offline);
        assert_eq!(config.day.map(|d| d.to_string()).as_deref(), Some("2024-03-15"));
        assert_eq!(config.position, Some((5, 6)));
    }

    #[test]
    fn test_startup_config_invalid_date() {
        let cli = Cli::parse_from([
            "daily-quote",
            "--date",
            "tomorrow",
            "--data-file",
            "/tmp/q.json",
        ]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidDate(_))
        ));
    }
}
