use super::{FormatError, Result};
use crate::model::Election;
use crate::LOG_TARGET;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

lazy_static! {
    /// Grid questions export one column per row as `Question [Row label]`.
    static ref GRID_COLUMN_RX: Regex = Regex::new(r"^.*\[(.+)\]\s*$").unwrap();
    static ref RANK_RX: Regex = Regex::new(r"^\s*(\d+)").unwrap();
}

/// Candidate name for a header cell.
pub fn candidate_name(header: &str) -> String {
    match GRID_COLUMN_RX.captures(header) {
        Some(caps) => caps[1].trim().to_string(),
        None => header.trim().to_string(),
    }
}

/// Rank written in a cell: its leading integer, if any.
pub fn parse_rank(cell: &str) -> Option<u32> {
    RANK_RX
        .captures(cell)
        .and_then(|caps| caps[1].parse().ok())
}

/// Turn per-candidate ranks into a ranking.
///
/// Rank `n` goes to the first candidate marked `n`. The ranking stops at the
/// first rank nobody holds, so marking only 1st and 3rd ranks just the 1st.
pub fn ranked_order(ranks: &[Option<u32>], candidates: &[String]) -> Vec<String> {
    let mut order = Vec::new();
    for rank in 1..=candidates.len() as u32 {
        match ranks.iter().position(|r| *r == Some(rank)) {
            Some(col) => order.push(candidates[col].clone()),
            None => break,
        }
    }
    order
}

/// Build an election from a grid whose first row names the candidates.
///
/// Every following row with at least one cell is a ballot, even when no cell
/// holds a rank.
pub fn grid_to_election<I>(rows: I, skip_columns: usize, source: &Path) -> Result<Election>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| FormatError::Empty(source.to_path_buf()))?;

    let mut header: Vec<String> = header
        .iter()
        .skip(skip_columns)
        .map(|h| candidate_name(h))
        .collect();
    // Spreadsheet exports often carry empty trailing columns.
    while header.last().map_or(false, |h| h.is_empty()) {
        header.pop();
    }
    if header.is_empty() {
        return Err(FormatError::NoCandidates(source.to_path_buf()));
    }

    let mut seen = HashSet::new();
    for (idx, name) in header.iter().enumerate() {
        if name.is_empty() {
            return Err(FormatError::BlankCandidate {
                column: idx + skip_columns + 1,
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(FormatError::DuplicateCandidate(name.clone()));
        }
    }

    let mut ballots = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        // A row of empty cells is still a response and counts toward the quota.
        if row.is_empty() {
            skipped += 1;
            continue;
        }
        let ranks: Vec<Option<u32>> = (0..header.len())
            .map(|col| {
                row.get(col + skip_columns)
                    .and_then(|cell| parse_rank(cell))
            })
            .collect();
        ballots.push(ranked_order(&ranks, &header));
    }

    log::debug!(
        target: LOG_TARGET,
        "Read {} ballots for {} candidates from {} ({} blank rows skipped)",
        ballots.len(),
        header.len(),
        source.display(),
        skipped
    );
    Ok(Election::new(header, ballots))
}
