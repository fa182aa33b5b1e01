//! Layered configuration.
//!
//! Priority, highest first: command-line flags, the TOML file
//! (`~/.config/taskboard/config.toml` unless `--config` is given), compiled
//! defaults. A missing default file is fine; a missing explicit file is not.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::chat::{is_valid_time_format, DEFAULT_TIME_FORMAT};
use crate::cli::Cli;
use crate::swipe::SWIPE_THRESHOLD_PX;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("could not determine config directory")]
    NoConfigDir,
}

// File structs: every field optional so a file can override just a few.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    ui: UiFileConfig,
    board: BoardFileConfig,
    log: LogFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    swipe_threshold_px: Option<i32>,
    cell_width_px: Option<u16>,
    timestamp_format: Option<String>,
    compact_width: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    sample_tasks: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogFileConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How long the event loop waits for input before ticking.
    pub poll_timeout: Duration,
    /// Horizontal drag distance, in pixels, that counts as a swipe.
    pub swipe_threshold_px: i32,
    /// Assumed width of one terminal cell, used to turn drags into pixels.
    pub cell_width_px: u16,
    /// chrono format for chat timestamps.
    pub timestamp_format: String,
    /// Below this terminal width the board shows one column with a tab strip.
    pub compact_width: u16,
    pub sample_tasks: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_timeout: Duration::from_millis(50),
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            cell_width_px: 8,
            timestamp_format: DEFAULT_TIME_FORMAT.to_string(),
            compact_width: 90,
            sample_tasks: true,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &Cli, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        Config {
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            swipe_threshold_px: file
                .ui
                .swipe_threshold_px
                .filter(|px| *px > 0)
                .unwrap_or(defaults.swipe_threshold_px),
            cell_width_px: file
                .ui
                .cell_width_px
                .filter(|px| *px > 0)
                .unwrap_or(defaults.cell_width_px),
            timestamp_format: file
                .ui
                .timestamp_format
                .clone()
                .filter(|f| is_valid_time_format(f))
                .unwrap_or(defaults.timestamp_format),
            compact_width: file.ui.compact_width.unwrap_or(defaults.compact_width),
            sample_tasks: !cli.no_sample_tasks
                && file.board.sample_tasks.unwrap_or(defaults.sample_tasks),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.log.level.clone())
                .unwrap_or(defaults.log_level),
            log_file: cli.log_file.clone().or_else(|| file.log.file.clone()),
        }
    }
}

/// `~/.config/taskboard/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("taskboard").join("config.toml"))
}

fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Ok(p) => (p, false),
            Err(_) => return Ok(ConfigFile::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(toml::from_str(&contents)?)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tb").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&cli(&[]), &ConfigFile::default());
        assert_eq!(config, Config::default());
        assert_eq!(config.swipe_threshold_px, 60);
        assert_eq!(config.poll_timeout, Duration::from_millis(50));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            [ui]
            swipe_threshold_px = 80
            timestamp_format = "%H:%M:%S"

            [board]
            sample_tasks = false
            "#,
        )
        .unwrap();
        let config = Config::resolve(&cli(&[]), &file);
        assert_eq!(config.swipe_threshold_px, 80);
        assert_eq!(config.timestamp_format, "%H:%M:%S");
        assert!(!config.sample_tasks);
        assert_eq!(config.cell_width_px, 8);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: ConfigFile = toml::from_str("[log]\nlevel = \"warn\"\n").unwrap();
        let config = Config::resolve(&cli(&["--log-level", "debug", "--no-sample-tasks"]), &file);
        assert_eq!(config.log_level, "debug");
        assert!(!config.sample_tasks);
    }

    #[test]
    fn test_bad_timestamp_format_falls_back() {
        let file: ConfigFile = toml::from_str(
            r#"
            [ui]
            timestamp_format = "%Q"
            "#,
        )
        .unwrap();
        let config = Config::resolve(&cli(&[]), &file);
        assert_eq!(config.timestamp_format, "%H:%M");
    }

    #[test]
    fn test_zero_threshold_falls_back() {
        let file: ConfigFile = toml::from_str("[ui]\nswipe_threshold_px = 0\ncell_width_px = 0\n").unwrap();
        let config = Config::resolve(&cli(&[]), &file);
        assert_eq!(config.swipe_threshold_px, SWIPE_THRESHOLD_PX);
        assert_eq!(config.cell_width_px, 8);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("taskboard-missing-config-test.toml");
        let err = load_config_file(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let path = std::env::temp_dir().join(format!("taskboard-bad-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[ui\n").unwrap();
        let err = load_config_file(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::ParseToml(_)));
    }
}
