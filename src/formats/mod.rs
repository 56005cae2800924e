pub mod common;
pub mod google_forms;

use crate::model::Election;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("{} contains no rows", .0.display())]
    Empty(PathBuf),
    #[error("{} has no candidate columns", .0.display())]
    NoCandidates(PathBuf),
    #[error("Column {column} has an empty candidate name")]
    BlankCandidate { column: usize },
    #[error("Candidate `{0}` appears in more than one column")]
    DuplicateCandidate(String),
    #[error("Cannot tell the format of {}, pass --format", .0.display())]
    UnknownFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Pick by file extension.
    Auto,
    Csv,
    /// Anything calamine opens: xlsx, xlsm, xls, ods.
    Workbook,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xls" | "ods" | "workbook" => Ok(InputFormat::Workbook),
            other => Err(format!(
                "unknown format `{}` (expected auto, csv or xlsx)",
                other
            )),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Workbook => write!(f, "workbook"),
        }
    }
}

impl InputFormat {
    /// Resolve `Auto` against the file extension.
    pub fn resolve(self, path: &Path) -> Result<InputFormat> {
        if self != InputFormat::Auto {
            return Ok(self);
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") | Some("txt") => Ok(InputFormat::Csv),
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => Ok(InputFormat::Workbook),
            _ => Err(FormatError::UnknownFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub format: InputFormat,
    /// Leading columns that are not candidates, e.g. the form timestamp.
    pub skip_columns: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            format: InputFormat::Auto,
            skip_columns: 1,
        }
    }
}

/// Read a rank grid into an `Election`.
pub fn read_election(path: &Path, options: &ReaderOptions) -> Result<Election> {
    match options.format.resolve(path)? {
        InputFormat::Csv => google_forms::read_csv(path, options.skip_columns),
        _ => google_forms::read_workbook(path, options.skip_columns),
    }
}
