//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{engine::parse_minutes, state::TimingSettings};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "flashtimer")]
#[command(about = "A full-screen countdown timer that flashes as time runs low")]
#[command(version)]
pub struct Config {
    /// File holding the persisted timer [default: <data dir>/flashtimer/state.json]
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Log file [default: flashtimer.log next to the state file]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Countdown refresh period in milliseconds
    #[arg(long, default_value = "250", value_parser = clap::value_parser!(u64).range(50..=1000))]
    pub tick_ms: u64,

    /// Seconds without interaction before the controls hide
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u64).range(1..))]
    pub controls_timeout_secs: u64,

    /// Start a countdown of this many minutes immediately
    #[arg(short, long, value_parser = parse_duration_arg)]
    pub duration: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_duration_arg(input: &str) -> Result<u32, String> {
    parse_minutes(input).map_err(|e| e.to_string())
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Resolve the state file, falling back to the platform data directory
    pub fn state_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("flashtimer")
                .join("state.json")
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.state_path().with_file_name("flashtimer.log"))
    }

    pub fn timing(&self) -> TimingSettings {
        TimingSettings {
            tick_period: Duration::from_millis(self.tick_ms),
            controls_timeout: Duration::from_secs(self.controls_timeout_secs),
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["flashtimer"]).unwrap();
        assert_eq!(config.timing(), TimingSettings::default());
        assert_eq!(config.duration, None);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_explicit_paths() {
        let config = Config::try_parse_from([
            "flashtimer",
            "--state-file",
            "/tmp/ft/state.json",
            "-d",
            "15",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.state_path(), PathBuf::from("/tmp/ft/state.json"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/ft/flashtimer.log"));
        assert_eq!(config.duration, Some(15));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::try_parse_from(["flashtimer", "--duration", "0"]).is_err());
        assert!(Config::try_parse_from(["flashtimer", "--duration", "soon"]).is_err());
        assert!(Config::try_parse_from(["flashtimer", "--tick-ms", "5000"]).is_err());
    }
}
