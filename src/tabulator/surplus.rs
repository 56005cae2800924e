use super::tally::{CandidateTally, RoundTally};
use crate::model::Ballot;

/// Candidates within `epsilon` of the highest vote sum, in tally order.
///
/// Sums of fractional weights pick up rounding noise, so winners are compared
/// with a tolerance. The leader itself is always included, even with a zero
/// epsilon.
pub fn winner_ties(tally: &RoundTally, epsilon: f64) -> Vec<&CandidateTally> {
    let best = match tally.highest() {
        Some(best) => best.vote_sum,
        None => return Vec::new(),
    };
    tally
        .ordered()
        .iter()
        .filter(|e| e.vote_sum == best || (e.vote_sum - best).abs() < epsilon)
        .collect()
}

/// Share of each contributing ballot's weight that moves on once the round's
/// leader, holding `vote_sum >= quota`, reaches the quota.
pub fn surplus_fraction(vote_sum: f64, quota: f64) -> f64 {
    debug_assert!(vote_sum >= quota && vote_sum > 0.0);
    (vote_sum - quota) / vote_sum
}

/// Scale down every ballot that counted for `elected` and return the factor.
///
/// The factor comes from `leader_sum`, the round's highest vote sum, so a
/// tie-break winner sitting just under the quota still gets a factor in
/// `[0, 1)`. Nothing is moved explicitly: the ballots keep their next
/// preference, and the reduced weight is what the next round's tally sees.
pub fn transfer_surplus(
    ballots: &mut [Ballot],
    elected: &CandidateTally,
    leader_sum: f64,
    quota: f64,
) -> f64 {
    let fraction = surplus_fraction(leader_sum, quota);
    for &idx in &elected.contributors {
        if let Some(ballot) = ballots.get_mut(idx) {
            ballot.scale_weight(fraction);
        }
    }
    fraction
}
