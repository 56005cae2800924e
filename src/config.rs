//! Tabulation options and the JSON options file they can be loaded from.
//!
//! The file holds either the options object itself or an object with a
//! `tabulationOptions` member, so a contest metadata file can be passed as is.
//! Command-line flags override values read from the file.

use crate::tabulator::{TabulationError, TabulationResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SEATS: usize = 3;

/// Vote sums closer than this are treated as equal when picking a winner.
pub const DEFAULT_TIE_EPSILON: f64 = 1e-10;

pub const DEFAULT_TIE_BREAK_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TabulationOptions {
    pub seats: usize,
    pub tie_epsilon: f64,
    pub max_tie_break_attempts: usize,
}

impl Default for TabulationOptions {
    fn default() -> Self {
        Self {
            seats: DEFAULT_SEATS,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            max_tie_break_attempts: DEFAULT_TIE_BREAK_ATTEMPTS,
        }
    }
}

impl TabulationOptions {
    pub fn with_seats(seats: usize) -> Self {
        Self {
            seats,
            ..Self::default()
        }
    }

    /// Checks that do not depend on the ballots.
    pub fn validate(&self) -> TabulationResult<()> {
        if self.seats == 0 {
            return Err(TabulationError::Configuration(
                "at least one seat is required".to_string(),
            ));
        }
        if !self.tie_epsilon.is_finite() || self.tie_epsilon < 0.0 {
            return Err(TabulationError::Configuration(format!(
                "tie epsilon must be a finite, non-negative number (got {})",
                self.tie_epsilon
            )));
        }
        if self.max_tie_break_attempts == 0 {
            return Err(TabulationError::Configuration(
                "at least one tie-break attempt is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read options file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse options file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsFile {
    Nested {
        #[serde(rename = "tabulationOptions")]
        tabulation_options: TabulationOptions,
    },
    Bare(TabulationOptions),
}

pub fn load_options(path: &Path) -> Result<TabulationOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_options(content: &str) -> Result<TabulationOptions, serde_json::Error> {
    let file: OptionsFile = serde_json::from_str(content)?;
    Ok(match file {
        OptionsFile::Nested { tabulation_options } => tabulation_options,
        OptionsFile::Bare(options) => options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = TabulationOptions::default();
        assert_eq!(options.seats, 3);
        assert_eq!(options.tie_epsilon, 1e-10);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_parse_bare_options_fills_defaults() {
        let options = parse_options(r#"{ "seats": 5 }"#).unwrap();
        assert_eq!(options.seats, 5);
        assert_eq!(options.tie_epsilon, DEFAULT_TIE_EPSILON);
        assert_eq!(options.max_tie_break_attempts, DEFAULT_TIE_BREAK_ATTEMPTS);
    }

    #[test]
    fn test_parse_nested_options() {
        let options = parse_options(
            r#"{ "name": "Board", "tabulationOptions": { "seats": 2, "tieEpsilon": 0.001 } }"#,
        )
        .unwrap();
        assert_eq!(options.seats, 2);
        assert_eq!(options.tie_epsilon, 0.001);
    }

    #[test]
    fn test_load_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "maxTieBreakAttempts": 1 }}"#).unwrap();
        let options = load_options(file.path()).unwrap();
        assert_eq!(options.max_tie_break_attempts, 1);
        assert_eq!(options.seats, DEFAULT_SEATS);
    }

    #[test]
    fn test_load_options_reports_path() {
        let err = load_options(Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/options.json"));
    }

    #[test]
    fn test_validate_rejects_degenerate_options() {
        assert!(TabulationOptions::with_seats(0).validate().is_err());

        let mut options = TabulationOptions::default();
        options.tie_epsilon = f64::NAN;
        assert!(options.validate().is_err());

        options.tie_epsilon = -1.0;
        assert!(options.validate().is_err());

        let mut options = TabulationOptions::default();
        options.max_tie_break_attempts = 0;
        assert!(options.validate().is_err());
    }
}
