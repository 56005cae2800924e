//! ranked-stv: Single Transferable Vote counting for ranked ballots.
//!
//! Ballots are read from a rank grid (`formats`), counted round by round
//! (`tabulator`) and reported to the console or as JSON (`reports`).
//! The count itself does no IO: pacing, tie-breaks and round reporting go
//! through the traits in `tabulator`, so they can be scripted in tests.
//!
//! ```rust
//! use ranked_stv::{Election, ScriptedTieBreak, TabulationOptions, Tabulator};
//!
//! let election = Election::new(
//!     vec!["A".into(), "B".into(), "C".into()],
//!     vec![vec!["A".into(), "C".into()], vec!["B".into(), "C".into()], vec!["C".into()]],
//! );
//! let mut tabulator = Tabulator::new(TabulationOptions::with_seats(1), ScriptedTieBreak::new(vec!["B"]));
//! let result = tabulator.tabulate(&election).unwrap();
//! assert_eq!(result.elected, vec!["C"]);
//! ```

pub mod config;
pub mod formats;
pub mod model;
pub mod reports;
pub mod tabulator;
pub mod util;

/// Log target used by every module of the crate.
pub const LOG_TARGET: &str = "ranked-stv";

pub use config::TabulationOptions;
pub use model::{Ballot, Election, ElectionState};
pub use tabulator::{
    ElectionResult, RosterOrderTieBreak, ScriptedTieBreak, TabulationError, Tabulator,
    TieBreakProvider, TieContext,
};
