use serde::{Deserialize, Serialize};

/// Parsed election input: the candidate roster in its fixed order, and one
/// ranking per ballot (most preferred first).
///
/// Readers in `crate::formats` produce this; the tabulator validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Election {
    pub candidates: Vec<String>,
    pub ballots: Vec<Vec<String>>,
}

impl Election {
    pub fn new(candidates: Vec<String>, ballots: Vec<Vec<String>>) -> Election {
        Election {
            candidates,
            ballots,
        }
    }

    pub fn ballot_count(&self) -> usize {
        self.ballots.len()
    }

    /// Ballots that rank nobody. They still count toward the quota.
    pub fn blank_ballot_count(&self) -> usize {
        self.ballots.iter().filter(|b| b.is_empty()).count()
    }
}
