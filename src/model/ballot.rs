use serde::Serialize;
use std::fmt;

/// A ballot as it moves through the rounds.
///
/// `preferences` shrinks as candidates are passed or eliminated; `original`
/// keeps the ranking as cast for reporting. The weight starts at 1.0 and is
/// only ever scaled down, when the ballot helped elect a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ballot {
    preferences: Vec<String>,
    original: Vec<String>,
    weight: f64,
}

impl Ballot {
    pub fn new(preferences: Vec<String>) -> Ballot {
        Ballot {
            original: preferences.clone(),
            preferences,
            weight: 1.0,
        }
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn original(&self) -> &[String] {
        &self.original
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The candidate this ballot currently counts for, if any.
    pub fn next_preference(&self) -> Option<&str> {
        self.preferences.first().map(|c| c.as_str())
    }

    pub fn is_exhausted(&self) -> bool {
        self.preferences.is_empty()
    }

    /// Drop every remaining preference for which `is_active` is false.
    pub fn retain_active<F>(&mut self, is_active: F)
    where
        F: Fn(&str) -> bool,
    {
        self.preferences.retain(|c| is_active(c));
    }

    pub(crate) fn scale_weight(&mut self, factor: f64) {
        debug_assert!((0.0..=1.0).contains(&factor), "scale factor {}", factor);
        self.weight *= factor;
    }
}

impl fmt::Display for Ballot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for candidate in &self.preferences {
            write!(f, "({}) ", candidate)?;
        }
        write!(f, "value = {}", self.weight)
    }
}
