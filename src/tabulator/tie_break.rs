use super::error::{TabulationError, TabulationResult};
use crate::LOG_TARGET;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// What a tie is being broken for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TieContext {
    Elect,
    Eliminate,
}

impl fmt::Display for TieContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieContext::Elect => write!(f, "elect"),
            TieContext::Eliminate => write!(f, "eliminate"),
        }
    }
}

/// Supplies the decision when several candidates are tied.
///
/// Answers are validated by the caller; an answer outside `tied` is passed
/// to [`TieBreakProvider::rejected`] and the provider is asked again.
pub trait TieBreakProvider {
    fn choose(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String>;

    fn rejected(&mut self, _selection: &str, _tied: &[String]) {}
}

impl<T: TieBreakProvider + ?Sized> TieBreakProvider for &mut T {
    fn choose(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String> {
        (**self).choose(context, tied)
    }

    fn rejected(&mut self, selection: &str, tied: &[String]) {
        (**self).rejected(selection, tied)
    }
}

impl<T: TieBreakProvider + ?Sized> TieBreakProvider for Box<T> {
    fn choose(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String> {
        (**self).choose(context, tied)
    }

    fn rejected(&mut self, selection: &str, tied: &[String]) {
        (**self).rejected(selection, tied)
    }
}

/// Ask `provider` until it names one of `tied`, at most `max_attempts` times.
pub fn resolve_tie(
    provider: &mut dyn TieBreakProvider,
    context: TieContext,
    tied: &[String],
    max_attempts: usize,
) -> TabulationResult<String> {
    let mut last = String::new();

    for attempt in 1..=max_attempts.max(1) {
        let answer = provider.choose(context, tied)?;
        let selection = answer.trim();
        if let Some(chosen) = tied.iter().find(|c| c.as_str() == selection) {
            log::debug!(
                target: LOG_TARGET,
                "Tie to {} broken in favour of {} (attempt {})",
                context,
                chosen,
                attempt
            );
            return Ok(chosen.clone());
        }

        log::warn!(
            target: LOG_TARGET,
            "Rejected tie-break selection `{}` (attempt {} of {})",
            selection,
            attempt,
            max_attempts
        );
        provider.rejected(selection, tied);
        last = selection.to_string();
    }

    Err(TabulationError::InvalidSelection {
        selected: last,
        tied: tied.to_vec(),
    })
}

/// Answers taken in order from a fixed list.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTieBreak {
    answers: VecDeque<String>,
}

impl ScriptedTieBreak {
    pub fn new<I, S>(answers: I) -> ScriptedTieBreak
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedTieBreak {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl TieBreakProvider for ScriptedTieBreak {
    fn choose(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String> {
        self.answers.pop_front().ok_or_else(|| {
            TabulationError::TieBreakUnavailable(format!(
                "no scripted answer left to {} one of {}",
                context,
                tied.join(", ")
            ))
        })
    }
}

/// Elects the earliest-listed and eliminates the latest-listed tied candidate.
#[derive(Debug, Clone)]
pub struct RosterOrderTieBreak {
    roster: Vec<String>,
}

impl RosterOrderTieBreak {
    pub fn new(roster: Vec<String>) -> RosterOrderTieBreak {
        RosterOrderTieBreak { roster }
    }

    fn position(&self, candidate: &str) -> usize {
        self.roster
            .iter()
            .position(|c| c == candidate)
            .unwrap_or(usize::MAX)
    }
}

impl TieBreakProvider for RosterOrderTieBreak {
    fn choose(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String> {
        let picked = match context {
            TieContext::Elect => tied.iter().min_by_key(|c| self.position(c)),
            TieContext::Eliminate => tied.iter().max_by_key(|c| self.position(c)),
        };
        picked.cloned().ok_or_else(|| {
            TabulationError::TieBreakUnavailable(format!("empty tie to {}", context))
        })
    }
}
