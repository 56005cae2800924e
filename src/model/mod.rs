pub mod ballot;
pub mod election;
pub mod state;

pub use ballot::Ballot;
pub use election::Election;
pub use state::{CandidateStatus, ElectionState};
