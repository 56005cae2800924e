mod info;
mod prompt;
mod tabulate;

pub use info::{info, InfoArgs};
pub use tabulate::{tabulate, TabulateArgs, TieBreakMode};

use clap::Args;
use ranked_stv::config::{load_options, ConfigError, TabulationOptions};
use ranked_stv::formats::{FormatError, InputFormat, ReaderOptions};
use ranked_stv::tabulator::TabulationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Ballot file error: {0}")]
    Format(#[from] FormatError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Tabulation error: {0}")]
    Tabulation(#[from] TabulationError),
    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the ballots are and how to read them.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Rank-grid export (CSV or spreadsheet)
    pub ballots: PathBuf,
    /// Input format: auto, csv or xlsx
    #[clap(long, default_value = "auto")]
    pub format: InputFormat,
    /// Leading columns that hold no candidates (form timestamp)
    #[clap(long, default_value_t = 1)]
    pub skip_columns: usize,
}

impl InputArgs {
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            format: self.format,
            skip_columns: self.skip_columns,
        }
    }
}

/// Tabulation options, from a JSON file and/or flags. Flags win.
#[derive(Debug, Default, Args)]
pub struct OptionArgs {
    /// JSON file with tabulation options
    #[clap(long)]
    pub options: Option<PathBuf>,
    /// Number of seats to fill
    #[clap(long, short)]
    pub seats: Option<usize>,
    /// Tolerance for treating top vote sums as tied
    #[clap(long)]
    pub tie_epsilon: Option<f64>,
    /// Invalid tie-break answers accepted before giving up
    #[clap(long)]
    pub tie_break_attempts: Option<usize>,
}

impl OptionArgs {
    pub fn resolve(&self) -> Result<TabulationOptions, ConfigError> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => TabulationOptions::default(),
        };
        if let Some(seats) = self.seats {
            options.seats = seats;
        }
        if let Some(tie_epsilon) = self.tie_epsilon {
            options.tie_epsilon = tie_epsilon;
        }
        if let Some(attempts) = self.tie_break_attempts {
            options.max_tie_break_attempts = attempts;
        }
        Ok(options)
    }
}
