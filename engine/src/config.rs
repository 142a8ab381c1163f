//! Demo configuration loaded from `turnstile.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "turnstile.toml";

/// Tunables for the sample screen. All fields have defaults; a missing
/// config file means a default configuration, not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TurnstileConfig {
    /// How long the exclusive tap computation runs, in milliseconds.
    pub tap_millis: u64,
    /// How long a boost probe runs before committing, in milliseconds.
    pub boost_millis: u64,
    /// Frame cadence of the TUI loop, in milliseconds.
    pub tick_millis: u64,
    /// Use ASCII-only glyphs for badges and spinners.
    pub ascii_only: bool,
}

impl Default for TurnstileConfig {
    fn default() -> Self {
        Self {
            tap_millis: 1_000,
            boost_millis: 750,
            tick_millis: 33,
            ascii_only: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TurnstileConfig {
    /// Load from `turnstile.toml` in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::current_dir()
            .map(|dir| dir.join(CONFIG_FILE))
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub const fn tap_duration(&self) -> Duration {
        Duration::from_millis(self.tap_millis)
    }

    #[must_use]
    pub const fn boost_duration(&self) -> Duration {
        Duration::from_millis(self.boost_millis)
    }

    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: TurnstileConfig = toml::from_str("tap_millis = 250").expect("valid toml");
        assert_eq!(config.tap_millis, 250);
        assert_eq!(config.boost_millis, 750);
        assert_eq!(config.tick_millis, 33);
        assert!(!config.ascii_only);
    }

    #[test]
    fn durations_come_from_millis() {
        let config = TurnstileConfig::default();
        assert_eq!(config.tap_duration(), Duration::from_millis(1_000));
        assert_eq!(config.tick_duration(), Duration::from_millis(33));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = TurnstileConfig::load_from(Path::new("does-not-exist.toml"))
            .expect("missing file falls back to defaults");
        assert_eq!(config.tap_millis, 1_000);
    }

    #[test]
    fn parse_errors_carry_the_path() {
        let source = toml::from_str::<TurnstileConfig>("tap_millis = \"soon\"")
            .expect_err("type mismatch must fail");
        let err = ConfigError::Parse {
            path: PathBuf::from("turnstile.toml"),
            source,
        };
        assert!(err.to_string().contains("turnstile.toml"));
    }
}
