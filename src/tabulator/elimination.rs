use super::tally::{CandidateTally, RoundTally};
use crate::model::ElectionState;

/// Candidates sharing the lowest vote sum, in tally order.
///
/// Unlike `winner_ties`, this compares vote sums exactly.
pub fn loser_ties(tally: &RoundTally) -> Vec<&CandidateTally> {
    let worst = match tally.lowest() {
        Some(worst) => worst.vote_sum,
        None => return Vec::new(),
    };
    tally
        .ordered()
        .iter()
        .filter(|e| e.vote_sum == worst)
        .collect()
}

/// Active candidates heading no ballot this round, in roster order.
pub fn zero_vote_candidates(state: &ElectionState, tally: &RoundTally) -> Vec<String> {
    state
        .active_candidates()
        .filter(|c| !tally.contains(c))
        .cloned()
        .collect()
}
