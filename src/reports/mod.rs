use crate::config::TabulationOptions;
use crate::model::Election;
use crate::tabulator::{ElectionResult, RoundRecord};
use serde::{Deserialize, Serialize};

pub mod console;

/// Where the ballots came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub path: String,
    /// SHA-1 of the input file, so a report can be matched to its data.
    pub sha1: String,
    pub data_format: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub elected: Vec<String>,
    pub eliminated: Vec<String>,
    pub total_rounds: usize,
    pub total_ballots: usize,
    /// Ballots with no remaining preference when the count ended.
    pub exhausted_ballots: usize,
}

/// Full count report, written as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionReport {
    pub info: SourceInfo,
    pub options: TabulationOptions,
    pub quota: f64,
    pub ballot_count: usize,
    pub candidates: Vec<String>,
    pub rounds: Vec<RoundRecord>,
    pub summary: ResultSummary,
}

impl ElectionReport {
    pub fn new(
        info: SourceInfo,
        options: &TabulationOptions,
        election: &Election,
        result: &ElectionResult,
    ) -> ElectionReport {
        let summary = ResultSummary {
            elected: result.elected.clone(),
            eliminated: result.eliminated.clone(),
            total_rounds: result.rounds.len(),
            total_ballots: election.ballot_count(),
            exhausted_ballots: result
                .rounds
                .last()
                .map(|r| r.exhausted_ballots)
                .unwrap_or(0),
        };

        ElectionReport {
            info,
            options: options.clone(),
            quota: result.quota,
            ballot_count: election.ballot_count(),
            candidates: election.candidates.clone(),
            rounds: result.rounds.clone(),
            summary,
        }
    }
}
