//! Weighted-transfer STV count.
//!
//! Each round filters the ballots down to active candidates, tallies them by
//! their first remaining preference and then either elects the leader (when
//! the leader reaches the quota) or eliminates the trailing candidate.
//! The run ends as soon as every seat is filled.

pub mod elimination;
pub mod error;
pub mod events;
pub mod quota;
pub mod surplus;
pub mod tally;
pub mod tie_break;

use crate::config::TabulationOptions;
use crate::model::{Ballot, Election, ElectionState};
use crate::LOG_TARGET;
use serde::Serialize;
use std::collections::HashSet;

pub use error::{TabulationError, TabulationResult};
pub use events::{
    BallotSnapshot, ElectionOpened, NoPause, RoundAdvance, RoundObserver, RoundOutcome,
    RoundRecord, RoundSnapshot,
};
pub use quota::compute_quota;
pub use tally::{CandidateTally, CandidateVotes, RoundTally};
pub use tie_break::{
    resolve_tie, RosterOrderTieBreak, ScriptedTieBreak, TieBreakProvider, TieContext,
};

/// Outcome of a completed count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResult {
    pub quota: f64,
    pub seats: usize,
    /// In order of election.
    pub elected: Vec<String>,
    /// In order of elimination.
    pub eliminated: Vec<String>,
    pub rounds: Vec<RoundRecord>,
}

/// Runs elections with a fixed set of options and collaborators.
pub struct Tabulator<'a> {
    options: TabulationOptions,
    tie_break: Box<dyn TieBreakProvider + 'a>,
    advance: Box<dyn RoundAdvance + 'a>,
    observers: Vec<Box<dyn RoundObserver + 'a>>,
}

impl<'a> Tabulator<'a> {
    pub fn new(options: TabulationOptions, tie_break: impl TieBreakProvider + 'a) -> Self {
        Self {
            options,
            tie_break: Box::new(tie_break),
            advance: Box::new(NoPause),
            observers: Vec::new(),
        }
    }

    pub fn with_round_advance(mut self, advance: impl RoundAdvance + 'a) -> Self {
        self.advance = Box::new(advance);
        self
    }

    pub fn with_observer(mut self, observer: impl RoundObserver + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn tabulate(&mut self, election: &Election) -> TabulationResult<ElectionResult> {
        self.options.validate()?;
        validate_election(election, self.options.seats)?;

        let quota = compute_quota(election.ballot_count(), self.options.seats)?;
        let mut state = ElectionState::new(election.candidates.clone(), self.options.seats, quota);
        let mut ballots: Vec<Ballot> = election.ballots.iter().cloned().map(Ballot::new).collect();

        log::info!(
            target: LOG_TARGET,
            "Counting {} ballots for {} seats among {} candidates, quota {}",
            ballots.len(),
            state.seats(),
            state.roster().len(),
            quota
        );
        let opened = ElectionOpened {
            candidates: state.roster().len(),
            seats: state.seats(),
            ballots: ballots.len(),
            quota,
        };
        for observer in self.observers.iter_mut() {
            observer.election_opened(&opened);
        }

        let mut rounds = Vec::new();
        let mut round = 0u32;

        while !state.is_complete() {
            for ballot in ballots.iter_mut() {
                ballot.retain_active(|c| state.is_active(c));
            }
            let tally = RoundTally::count(&ballots);
            round += 1;

            self.advance.before_round(round);
            let votes = tally.by_roster(state.roster());
            if !self.observers.is_empty() {
                let snapshot = snapshot(round, &state, &ballots, &votes);
                for observer in self.observers.iter_mut() {
                    observer.round_tallied(&snapshot);
                }
            }

            let best = match tally.highest() {
                Some(best) => best.vote_sum,
                None => {
                    log::error!(
                        target: LOG_TARGET,
                        "No ballot counts for any candidate in round {}",
                        round
                    );
                    return Err(TabulationError::ElectionDeadlock {
                        round,
                        passed: state.passed().len(),
                        seats: state.seats(),
                    });
                }
            };

            let outcome = if best >= quota {
                self.elect(&mut state, &mut ballots, &tally, best)?
            } else {
                self.eliminate(&mut state, &tally)?
            };

            log::debug!(
                target: LOG_TARGET,
                "Round {} decided for {}",
                round,
                outcome.candidate()
            );
            for observer in self.observers.iter_mut() {
                observer.round_decided(round, &outcome);
            }
            rounds.push(RoundRecord {
                round,
                tally: votes,
                exhausted_ballots: ballots.iter().filter(|b| b.is_exhausted()).count(),
                outcome,
            });
        }

        let result = ElectionResult {
            quota,
            seats: state.seats(),
            elected: state.passed().to_vec(),
            eliminated: state.eliminated().to_vec(),
            rounds,
        };
        log::info!(
            target: LOG_TARGET,
            "Count finished after {} rounds, elected: {}",
            round,
            result.elected.join(", ")
        );
        for observer in self.observers.iter_mut() {
            observer.election_finished(&result);
        }
        Ok(result)
    }

    fn elect(
        &mut self,
        state: &mut ElectionState,
        ballots: &mut [Ballot],
        tally: &RoundTally,
        leader_sum: f64,
    ) -> TabulationResult<RoundOutcome> {
        let tied = surplus::winner_ties(tally, self.options.tie_epsilon);
        let (winner, tied) = match tied.as_slice() {
            [single] => (*single, Vec::new()),
            _ => {
                let names: Vec<String> = tied.iter().map(|e| e.candidate.clone()).collect();
                let chosen = self.break_tie(TieContext::Elect, &names)?;
                let winner = tally.get(&chosen).ok_or_else(|| {
                    TabulationError::InvalidSelection {
                        selected: chosen.clone(),
                        tied: names.clone(),
                    }
                })?;
                (winner, names)
            }
        };

        let surplus_fraction =
            surplus::transfer_surplus(ballots, winner, leader_sum, state.quota());
        state.pass(&winner.candidate);
        log::info!(
            target: LOG_TARGET,
            "Elected {} with {:.5} votes, surplus fraction {:.5}",
            winner.candidate,
            winner.vote_sum,
            surplus_fraction
        );

        Ok(RoundOutcome::Elected {
            candidate: winner.candidate.clone(),
            vote_sum: winner.vote_sum,
            surplus_fraction,
            tied,
        })
    }

    fn eliminate(
        &mut self,
        state: &mut ElectionState,
        tally: &RoundTally,
    ) -> TabulationResult<RoundOutcome> {
        let tied = elimination::loser_ties(tally);
        let (loser, tied) = match tied.as_slice() {
            [single] => (*single, Vec::new()),
            _ => {
                let names: Vec<String> = tied.iter().map(|e| e.candidate.clone()).collect();
                let chosen = self.break_tie(TieContext::Eliminate, &names)?;
                let loser = tally.get(&chosen).ok_or_else(|| {
                    TabulationError::InvalidSelection {
                        selected: chosen.clone(),
                        tied: names.clone(),
                    }
                })?;
                (loser, names)
            }
        };

        state.eliminate(&loser.candidate);
        log::info!(
            target: LOG_TARGET,
            "Eliminated {} with {:.5} votes",
            loser.candidate,
            loser.vote_sum
        );

        let zero_votes = elimination::zero_vote_candidates(state, tally);
        for candidate in &zero_votes {
            state.eliminate(candidate);
        }
        if !zero_votes.is_empty() {
            log::info!(
                target: LOG_TARGET,
                "Eliminated with zero votes: {}",
                zero_votes.join(", ")
            );
        }

        Ok(RoundOutcome::Eliminated {
            candidate: loser.candidate.clone(),
            vote_sum: loser.vote_sum,
            tied,
            zero_votes,
        })
    }

    fn break_tie(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String> {
        log::debug!(
            target: LOG_TARGET,
            "Tie to {} between {}",
            context,
            tied.join(", ")
        );
        resolve_tie(
            self.tie_break.as_mut(),
            context,
            tied,
            self.options.max_tie_break_attempts,
        )
    }
}

/// Reject inputs that cannot produce a meaningful count: an empty roster or
/// ballot list, too few candidates for the seats, a repeated roster name, or a
/// ballot naming an unknown candidate or the same candidate twice.
pub fn validate_election(election: &Election, seats: usize) -> TabulationResult<()> {
    let config_error = |msg: String| Err(TabulationError::Configuration(msg));

    if election.candidates.is_empty() {
        return config_error("no candidates".to_string());
    }
    if election.ballots.is_empty() {
        return config_error("no ballots".to_string());
    }
    if seats >= election.candidates.len() {
        return config_error(format!(
            "{} seats requires more than {} candidates",
            seats,
            election.candidates.len()
        ));
    }

    let mut roster = HashSet::new();
    for candidate in &election.candidates {
        if !roster.insert(candidate.as_str()) {
            return config_error(format!("candidate `{}` is listed twice", candidate));
        }
    }

    for (idx, ballot) in election.ballots.iter().enumerate() {
        let mut seen = HashSet::new();
        for candidate in ballot {
            if !roster.contains(candidate.as_str()) {
                return config_error(format!(
                    "ballot {} ranks unknown candidate `{}`",
                    idx + 1,
                    candidate
                ));
            }
            if !seen.insert(candidate.as_str()) {
                return config_error(format!(
                    "ballot {} ranks `{}` more than once",
                    idx + 1,
                    candidate
                ));
            }
        }
    }
    Ok(())
}

fn snapshot(
    round: u32,
    state: &ElectionState,
    ballots: &[Ballot],
    votes: &[CandidateVotes],
) -> RoundSnapshot {
    RoundSnapshot {
        round,
        quota: state.quota(),
        ballots: ballots
            .iter()
            .map(|b| BallotSnapshot {
                preferences: b.preferences().to_vec(),
                original: b.original().to_vec(),
                weight: b.weight(),
            })
            .collect(),
        tally: votes.to_vec(),
        passed: state.passed().to_vec(),
        eliminated: state.eliminated().to_vec(),
    }
}
