//! Startup configuration: an optional TOML file plus command-line overrides
//!
//! ```toml
//! value_count = 50
//! max_value = 100
//! step_delay_ms = 50
//! algorithm = "quick"
//! seed = 42
//! log_file = "dsviz.log"
//! log_level = "debug"
//! ```
//!
//! Every key is optional. Flags given on the command line win over the file.

use crate::engine::controller::MAX_VALUE_COUNT;
use crate::engine::Algorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Slowest and fastest speed the sorting view offers, in milliseconds
pub const STEP_DELAY_RANGE_MS: (u64, u64) = (1, 200);

/// Smallest and largest number of values "generate" may produce
pub const VALUE_COUNT_RANGE: (usize, usize) = (1, MAX_VALUE_COUNT);

/// Errors that can occur while building the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidArgument { flag: String, value: String },

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How many values "generate" produces
    pub value_count: usize,
    /// Generated values fall in `1..=max_value`
    pub max_value: i32,
    pub step_delay_ms: u64,
    /// Algorithm preselected in the sorting view
    pub algorithm: Algorithm,
    /// Seed for generation and shuffling; random when absent
    pub seed: Option<u64>,
    /// Where tracing output goes; logging is off when absent
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            value_count: 50,
            max_value: 100,
            step_delay_ms: 50,
            algorithm: Algorithm::Bubble,
            seed: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

/// What the binary should do after argument parsing
#[derive(Debug)]
pub enum Command {
    Run(Settings),
    Help,
}

pub const USAGE: &str = "\
Usage: dsviz [options]

Options:
  --config <path>      Load settings from a TOML file
  --count <n>          Number of values to generate
  --delay <ms>         Delay between sort steps (1-200)
  --algorithm <name>   bubble, selection, insertion, merge, quick or heap
  --seed <n>           Seed for random data and shuffling
  --log <path>         Write logs to this file
  -h, --help           Show this message";

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let (min, max) = STEP_DELAY_RANGE_MS;
        if !(min..=max).contains(&self.step_delay_ms) {
            return Err(ConfigError::Invalid(format!(
                "step_delay_ms must be between {} and {}, got {}",
                min, max, self.step_delay_ms
            )));
        }
        let (min, max) = VALUE_COUNT_RANGE;
        if !(min..=max).contains(&self.value_count) {
            return Err(ConfigError::Invalid(format!(
                "value_count must be between {} and {}, got {}",
                min, max, self.value_count
            )));
        }
        if self.max_value < 1 {
            return Err(ConfigError::Invalid(format!(
                "max_value must be at least 1, got {}",
                self.max_value
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".into()));
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Build settings from command-line arguments (without the program name)
    pub fn from_args<I>(args: I) -> ConfigResult<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if args.iter().any(|a| a == "-h" || a == "--help") {
            return Ok(Command::Help);
        }

        // The config file goes first so that every other flag overrides it
        let mut settings = match find_flag(&args, "--config")? {
            Some(path) => Self::load(Path::new(path))?,
            None => Settings::default(),
        };

        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .map(String::as_str)
                    .ok_or_else(|| ConfigError::MissingValue(flag.clone()))
            };
            match flag.as_str() {
                "--config" => {
                    value()?;
                }
                "--count" => settings.value_count = parse_number(flag, value()?)?,
                "--delay" => settings.step_delay_ms = parse_number(flag, value()?)?,
                "--seed" => settings.seed = Some(parse_number(flag, value()?)?),
                "--log" => settings.log_file = Some(PathBuf::from(value()?)),
                "--algorithm" => {
                    let raw = value()?;
                    settings.algorithm =
                        raw.parse().map_err(|_| ConfigError::InvalidArgument {
                            flag: flag.clone(),
                            value: raw.to_string(),
                        })?;
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        settings.validate()?;
        Ok(Command::Run(settings))
    }
}

fn find_flag<'a>(args: &'a [String], flag: &str) -> ConfigResult<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| ConfigError::MissingValue(flag.to_string())),
        None => Ok(None),
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| ConfigError::InvalidArgument {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str]) -> Settings {
        match Settings::from_args(args(list)).unwrap() {
            Command::Run(settings) => settings,
            Command::Help => panic!("Expected settings"),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = run(&[]);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.step_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_cli_overrides() {
        let settings = run(&[
            "--count",
            "12",
            "--delay",
            "5",
            "--algorithm",
            "heap",
            "--seed",
            "3",
        ]);
        assert_eq!(settings.value_count, 12);
        assert_eq!(settings.step_delay_ms, 5);
        assert_eq!(settings.algorithm, Algorithm::Heap);
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_help() {
        assert!(matches!(
            Settings::from_args(args(&["--count", "3", "--help"])),
            Ok(Command::Help)
        ));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(
            Settings::from_args(args(&["--count"])),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            Settings::from_args(args(&["--count", "many"])),
            Err(ConfigError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Settings::from_args(args(&["--algorithm", "bogo"])),
            Err(ConfigError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Settings::from_args(args(&["--verbose"])),
            Err(ConfigError::UnknownArgument(_))
        ));
        assert!(matches!(
            Settings::from_args(args(&["--delay", "500"])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_value_count_out_of_range() {
        assert!(matches!(
            Settings::from_args(args(&["--count", "4000000000000000000"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_args(args(&["--count", "0"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::parse("value_count = 10001"),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(run(&["--count", "10000"]).value_count, VALUE_COUNT_RANGE.1);
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings = Settings::parse("algorithm = \"merge\"\nvalue_count = 8\n").unwrap();
        assert_eq!(settings.algorithm, Algorithm::Merge);
        assert_eq!(settings.value_count, 8);
        assert_eq!(settings.max_value, 100);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(matches!(
            Settings::parse("max_value = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::parse("step_delay_ms = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "value_count = 30\nstep_delay_ms = 100\nseed = 9").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let settings = run(&["--delay", "20", "--config", &path]);
        assert_eq!(settings.value_count, 30);
        assert_eq!(settings.step_delay_ms, 20);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
