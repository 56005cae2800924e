#[derive(Debug, thiserror::Error)]
pub enum TabulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid tie-break selection `{selected}`, expected one of: {}", .tied.join(", "))]
    InvalidSelection { selected: String, tied: Vec<String> },
    #[error(
        "Election deadlocked in round {round}: {passed} of {seats} seats filled and every ballot is exhausted"
    )]
    ElectionDeadlock {
        round: u32,
        passed: usize,
        seats: usize,
    },
    #[error("Tie-break unavailable: {0}")]
    TieBreakUnavailable(String),
}

pub type TabulationResult<T> = std::result::Result<T, TabulationError>;
