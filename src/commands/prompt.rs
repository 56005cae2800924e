//! Console prompts: the pause between rounds and interactive tie-breaks.
//!
//! Standard input is read on a background thread so that a prompt can give up
//! after a timeout instead of blocking forever.

use colored::*;
use ranked_stv::tabulator::{
    RoundAdvance, TabulationError, TabulationResult, TieBreakProvider, TieContext,
};
use ranked_stv::LOG_TARGET;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("no answer within {} seconds", .0.as_secs())]
    TimedOut(Duration),
    #[error("standard input is closed")]
    Closed,
}

/// Lines typed by the operator.
pub struct LineSource {
    lines: Receiver<String>,
}

impl LineSource {
    pub fn stdin() -> Rc<LineSource> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        LineSource::from_receiver(rx)
    }

    pub fn from_receiver(lines: Receiver<String>) -> Rc<LineSource> {
        Rc::new(LineSource { lines })
    }

    /// Next line, waiting at most `timeout` if one is given.
    pub fn next_line(&self, timeout: Option<Duration>) -> Result<String, PromptError> {
        match timeout {
            Some(timeout) => self.lines.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => PromptError::TimedOut(timeout),
                RecvTimeoutError::Disconnected => PromptError::Closed,
            }),
            None => self.lines.recv().map_err(|_| PromptError::Closed),
        }
    }
}

fn flush_stdout() {
    if let Err(e) = io::stdout().flush() {
        log::warn!(target: LOG_TARGET, "Failed to flush prompt: {}", e);
    }
}

/// Waits for <enter> before each round.
pub struct ConsolePause {
    lines: Rc<LineSource>,
    timeout: Option<Duration>,
}

impl ConsolePause {
    pub fn new(lines: Rc<LineSource>, timeout: Option<Duration>) -> Self {
        Self { lines, timeout }
    }
}

impl RoundAdvance for ConsolePause {
    fn before_round(&mut self, round: u32) {
        println!("\nPress <enter> to continue to round {}", round);
        flush_stdout();
        if let Err(e) = self.lines.next_line(self.timeout) {
            log::debug!(target: LOG_TARGET, "Continuing to round {}: {}", round, e);
        }
    }
}

/// Asks the operator to pick among tied candidates.
pub struct ConsoleTieBreak {
    lines: Rc<LineSource>,
    timeout: Option<Duration>,
}

impl ConsoleTieBreak {
    pub fn new(lines: Rc<LineSource>, timeout: Option<Duration>) -> Self {
        Self { lines, timeout }
    }
}

impl TieBreakProvider for ConsoleTieBreak {
    fn choose(&mut self, context: TieContext, tied: &[String]) -> TabulationResult<String> {
        let (title, action) = match context {
            TieContext::Elect => ("[Winner tie]", "PASS"),
            TieContext::Eliminate => ("[Loser tie]", "DROP"),
        };
        println!("\n{}", title.bright_yellow().bold());
        println!("Tied: [{}]", tied.join(", "));
        print!("Choose the one to {}: ", action);
        flush_stdout();

        self.lines
            .next_line(self.timeout)
            .map_err(|e| TabulationError::TieBreakUnavailable(e.to_string()))
    }

    fn rejected(&mut self, selection: &str, tied: &[String]) {
        eprintln!(
            "❌ `{}` is not one of [{}], try again",
            selection,
            tied.join(", ")
        );
    }
}
