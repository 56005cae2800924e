use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateStatus {
    Active,
    Passed,
    Eliminated,
}

/// Everything the driver tracks between rounds.
///
/// Every roster candidate is in exactly one status. `passed` keeps election
/// order and `eliminated` keeps elimination order.
#[derive(Debug, Clone)]
pub struct ElectionState {
    quota: f64,
    seats: usize,
    roster: Vec<String>,
    status: HashMap<String, CandidateStatus>,
    passed: Vec<String>,
    eliminated: Vec<String>,
}

impl ElectionState {
    pub fn new(roster: Vec<String>, seats: usize, quota: f64) -> ElectionState {
        let status = roster
            .iter()
            .map(|c| (c.clone(), CandidateStatus::Active))
            .collect();

        ElectionState {
            quota,
            seats,
            roster,
            status,
            passed: Vec::new(),
            eliminated: Vec::new(),
        }
    }

    pub fn quota(&self) -> f64 {
        self.quota
    }

    pub fn seats(&self) -> usize {
        self.seats
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    pub fn status(&self, candidate: &str) -> Option<CandidateStatus> {
        self.status.get(candidate).copied()
    }

    pub fn is_active(&self, candidate: &str) -> bool {
        self.status(candidate) == Some(CandidateStatus::Active)
    }

    pub fn active_candidates(&self) -> impl Iterator<Item = &String> + '_ {
        self.roster.iter().filter(move |c| self.is_active(c))
    }

    /// All seats are filled.
    pub fn is_complete(&self) -> bool {
        self.passed.len() >= self.seats
    }

    pub(crate) fn pass(&mut self, candidate: &str) {
        self.transition(candidate, CandidateStatus::Passed);
        self.passed.push(candidate.to_string());
    }

    pub(crate) fn eliminate(&mut self, candidate: &str) {
        self.transition(candidate, CandidateStatus::Eliminated);
        self.eliminated.push(candidate.to_string());
    }

    fn transition(&mut self, candidate: &str, to: CandidateStatus) {
        let previous = self.status.insert(candidate.to_string(), to);
        debug_assert_eq!(
            previous,
            Some(CandidateStatus::Active),
            "{} left a non-active status",
            candidate
        );
    }
}
