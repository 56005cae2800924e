use super::error::{TabulationError, TabulationResult};

/// `total_ballots / (seats + 1)`, rounded to two decimal places.
///
/// Computed once per run from the original ballot count, blank ballots
/// included. A Droop-style recomputation from the shrinking number of
/// active ballots is a different variant and is not done here.
pub fn compute_quota(total_ballots: usize, seats: usize) -> TabulationResult<f64> {
    if total_ballots == 0 {
        return Err(TabulationError::Configuration(
            "cannot compute a quota without ballots".to_string(),
        ));
    }
    let divisor = seats.checked_add(1).ok_or_else(|| {
        TabulationError::Configuration(format!("seat count {} is out of range", seats))
    })?;

    let quota = round_to_cents(total_ballots as f64 / divisor as f64);
    if !quota.is_finite() || quota <= 0.0 {
        return Err(TabulationError::Configuration(format!(
            "quota for {} ballots and {} seats rounds to {}",
            total_ballots, seats, quota
        )));
    }
    Ok(quota)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
