use super::tally::CandidateVotes;
use super::ElectionResult;
use serde::Serialize;

/// Emitted once, after validation and before the first round.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionOpened {
    pub candidates: usize,
    pub seats: usize,
    pub ballots: usize,
    pub quota: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallotSnapshot {
    pub preferences: Vec<String>,
    pub original: Vec<String>,
    pub weight: f64,
}

/// State of the count after a round's tally, before its decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub quota: f64,
    pub ballots: Vec<BallotSnapshot>,
    pub tally: Vec<CandidateVotes>,
    pub passed: Vec<String>,
    pub eliminated: Vec<String>,
}

/// What a round decided. `tied` is empty when no tie-break was needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoundOutcome {
    #[serde(rename_all = "camelCase")]
    Elected {
        candidate: String,
        vote_sum: f64,
        surplus_fraction: f64,
        tied: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Eliminated {
        candidate: String,
        vote_sum: f64,
        tied: Vec<String>,
        zero_votes: Vec<String>,
    },
}

impl RoundOutcome {
    pub fn candidate(&self) -> &str {
        match self {
            RoundOutcome::Elected { candidate, .. } => candidate,
            RoundOutcome::Eliminated { candidate, .. } => candidate,
        }
    }
}

/// A finished round as kept in the result history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round: u32,
    pub tally: Vec<CandidateVotes>,
    pub exhausted_ballots: usize,
    pub outcome: RoundOutcome,
}

/// Paces the rounds. Called before each round is reported.
pub trait RoundAdvance {
    fn before_round(&mut self, round: u32);
}

/// Advances immediately. Used for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl RoundAdvance for NoPause {
    fn before_round(&mut self, _round: u32) {}
}

/// Receives round events. Every method defaults to doing nothing.
pub trait RoundObserver {
    fn election_opened(&mut self, _opened: &ElectionOpened) {}

    fn round_tallied(&mut self, _snapshot: &RoundSnapshot) {}

    fn round_decided(&mut self, _round: u32, _outcome: &RoundOutcome) {}

    fn election_finished(&mut self, _result: &ElectionResult) {}
}
