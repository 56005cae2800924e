use crate::model::Ballot;
use serde::Serialize;
use std::collections::HashMap;

/// One candidate's standing in a round.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTally {
    pub candidate: String,
    pub vote_sum: f64,
    /// Indices of the ballots counting for this candidate this round.
    pub contributors: Vec<usize>,
}

/// Vote sum reported for a roster candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateVotes {
    pub candidate: String,
    pub votes: f64,
}

/// The weighted first-preference count for one round.
///
/// Only candidates heading at least one ballot appear. Entries are sorted by
/// vote sum, highest first; equal sums keep the order in which the candidates
/// were first seen while scanning the ballots.
#[derive(Debug, Clone, Default)]
pub struct RoundTally {
    entries: Vec<CandidateTally>,
}

impl RoundTally {
    /// Count ballots by their current head. Callers filter out passed and
    /// eliminated candidates first.
    pub fn count(ballots: &[Ballot]) -> RoundTally {
        let mut entries: Vec<CandidateTally> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for (idx, ballot) in ballots.iter().enumerate() {
            let head = match ballot.next_preference() {
                Some(head) => head,
                None => continue,
            };
            let slot = *slots.entry(head).or_insert_with(|| {
                entries.push(CandidateTally {
                    candidate: head.to_string(),
                    vote_sum: 0.0,
                    contributors: Vec::new(),
                });
                entries.len() - 1
            });
            let entry = &mut entries[slot];
            entry.vote_sum += ballot.weight();
            entry.contributors.push(idx);
        }

        // Vec::sort_by is stable.
        entries.sort_by(|a, b| b.vote_sum.total_cmp(&a.vote_sum));
        RoundTally { entries }
    }

    pub fn ordered(&self) -> &[CandidateTally] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn highest(&self) -> Option<&CandidateTally> {
        self.entries.first()
    }

    pub fn lowest(&self) -> Option<&CandidateTally> {
        self.entries.last()
    }

    pub fn get(&self, candidate: &str) -> Option<&CandidateTally> {
        self.entries.iter().find(|e| e.candidate == candidate)
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.get(candidate).is_some()
    }

    pub fn vote_sum(&self, candidate: &str) -> f64 {
        self.get(candidate).map(|e| e.vote_sum).unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.vote_sum).sum()
    }

    /// Vote sums for every roster candidate, in roster order, zero when absent.
    pub fn by_roster(&self, roster: &[String]) -> Vec<CandidateVotes> {
        roster
            .iter()
            .map(|c| CandidateVotes {
                candidate: c.clone(),
                votes: self.vote_sum(c),
            })
            .collect()
    }
}
