//! Harness configuration, read from the environment.
//!
//! The harness has no command-line surface; the entry point only takes the
//! test cases. Knobs that don't change what is reported (only how) come
//! from environment variables:
//!
//! - `XTEST_VERBOSE` - `1`/`true`/`yes` print a status line per test method
//! - `XTEST_PRECISION` - decimal places for durations, `0..=9`

use thiserror::Error;
use xtest_core::DEFAULT_PRECISION;

/// Environment variable enabling per-test status lines.
pub const VERBOSE_VAR: &str = "XTEST_VERBOSE";
/// Environment variable selecting duration precision.
pub const PRECISION_VAR: &str = "XTEST_PRECISION";

/// Largest accepted duration precision.
const MAX_PRECISION: usize = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected a boolean (1/0, true/false, yes/no), got `{value}`")]
    InvalidBool { var: &'static str, value: String },
    #[error("{var}: expected a precision between 0 and 9, got `{value}`")]
    InvalidPrecision { var: &'static str, value: String },
}

/// Configuration for a harness run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Print `Test Case '...' passed|failed (... seconds).` after each method.
    pub verbose: bool,
    /// Decimal places for both durations in the summary line.
    pub precision: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            verbose: false,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; set but malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = HarnessConfig::default();

        if let Some(value) = lookup(VERBOSE_VAR) {
            config.verbose = parse_bool(VERBOSE_VAR, &value)?;
        }
        if let Some(value) = lookup(PRECISION_VAR) {
            config.precision = parse_precision(PRECISION_VAR, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

fn parse_precision(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|p| *p <= MAX_PRECISION)
        .ok_or_else(|| ConfigError::InvalidPrecision {
            var,
            value: value.to_string(),
        })
}
