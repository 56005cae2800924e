//! Round-by-round console rendering of a count.

use crate::tabulator::{
    ElectionOpened, ElectionResult, RoundObserver, RoundOutcome, RoundSnapshot,
};
use crate::LOG_TARGET;
use colored::*;
use itertools::Itertools;
use std::io::{self, Write};

pub struct ConsoleRenderer<W: Write> {
    out: W,
    /// Print every ballot each round. Off for large files.
    show_ballots: bool,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout(show_ballots: bool) -> Self {
        Self::new(io::stdout(), show_ballots)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, show_ballots: bool) -> Self {
        Self { out, show_ballots }
    }

    fn write_opened(&mut self, opened: &ElectionOpened) -> io::Result<()> {
        writeln!(
            self.out,
            "Candidates={} Seats={} Votes={} Quota={}",
            opened.candidates.to_string().bright_cyan(),
            opened.seats.to_string().bright_cyan(),
            opened.ballots.to_string().bright_cyan(),
            opened.quota.to_string().bright_yellow()
        )
    }

    fn write_round(&mut self, snapshot: &RoundSnapshot) -> io::Result<()> {
        writeln!(
            self.out,
            "{}",
            format!("--- ROUND {} ---", snapshot.round).bright_white().bold()
        )?;

        if self.show_ballots {
            writeln!(self.out, "\n{}", "[Ballots and their values]".bright_cyan())?;
            for (idx, ballot) in snapshot.ballots.iter().enumerate() {
                writeln!(
                    self.out,
                    "vote {}: {} value = {}",
                    idx + 1,
                    ballot.preferences.iter().map(|c| format!("({})", c)).join(" "),
                    ballot.weight
                )?;
            }
        }

        writeln!(self.out, "\n{}", "[Candidates and their vote sums]".bright_cyan())?;
        for entry in &snapshot.tally {
            writeln!(self.out, "{} = {:.2}", entry.candidate, entry.votes)?;
        }

        writeln!(self.out, "\n{}", "[Status so far]".bright_cyan())?;
        writeln!(self.out, "Passed: [{}]", snapshot.passed.join(", "))?;
        writeln!(self.out, "Eliminated: [{}]", snapshot.eliminated.join(", "))
    }

    fn write_outcome(&mut self, outcome: &RoundOutcome) -> io::Result<()> {
        match outcome {
            RoundOutcome::Elected {
                candidate,
                vote_sum,
                surplus_fraction,
                tied,
            } => {
                writeln!(self.out, "\n{}", "[Quota exceeded]".bright_cyan())?;
                writeln!(self.out, "Highest vote count = {}", vote_sum)?;
                if !tied.is_empty() {
                    writeln!(self.out, "Winner tie between [{}]", tied.join(", "))?;
                }
                writeln!(
                    self.out,
                    "\n>>> Candidate elected = {}",
                    candidate.bright_green().bold()
                )?;
                writeln!(self.out, "Reallocating surplus = {:.5}", surplus_fraction)
            }
            RoundOutcome::Eliminated {
                candidate,
                vote_sum,
                tied,
                zero_votes,
            } => {
                writeln!(self.out, "\n{}", "[Quota not exceeded]".bright_cyan())?;
                writeln!(self.out, "Fewest vote count = {}", vote_sum)?;
                if !tied.is_empty() {
                    writeln!(self.out, "Loser tie between [{}]", tied.join(", "))?;
                }
                writeln!(
                    self.out,
                    "\n>>> Candidate eliminated = {}",
                    candidate.bright_red().bold()
                )?;
                if !zero_votes.is_empty() {
                    writeln!(
                        self.out,
                        "Eliminating candidates with zero votes = [{}]",
                        zero_votes.join(", ")
                    )?;
                }
                Ok(())
            }
        }
    }

    fn write_finished(&mut self, result: &ElectionResult) -> io::Result<()> {
        writeln!(self.out, "\n{}\n", "--- FINISHED ---".bright_white().bold())?;
        writeln!(self.out, "Eliminated: [{}]\n", result.eliminated.join(", "))?;
        writeln!(
            self.out,
            "Elected: [{}]",
            result.elected.iter().map(|c| c.bright_green().bold()).join(", ")
        )?;
        self.out.flush()
    }

    fn report(&self, result: io::Result<()>) {
        if let Err(e) = result {
            log::warn!(target: LOG_TARGET, "Failed to write round output: {}", e);
        }
    }
}

impl<W: Write> RoundObserver for ConsoleRenderer<W> {
    fn election_opened(&mut self, opened: &ElectionOpened) {
        let result = self.write_opened(opened);
        self.report(result);
    }

    fn round_tallied(&mut self, snapshot: &RoundSnapshot) {
        let result = self.write_round(snapshot);
        self.report(result);
    }

    fn round_decided(&mut self, _round: u32, outcome: &RoundOutcome) {
        let result = self.write_outcome(outcome);
        self.report(result);
    }

    fn election_finished(&mut self, result: &ElectionResult) {
        let written = self.write_finished(result);
        self.report(written);
    }
}
