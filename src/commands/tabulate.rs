use super::prompt::{ConsolePause, ConsoleTieBreak, LineSource};
use super::{CommandError, InputArgs, OptionArgs};
use clap::Args;
use colored::*;
use ranked_stv::formats::read_election;
use ranked_stv::reports::console::ConsoleRenderer;
use ranked_stv::reports::{ElectionReport, SourceInfo};
use ranked_stv::tabulator::{
    RosterOrderTieBreak, ScriptedTieBreak, Tabulator, TieBreakProvider,
};
use ranked_stv::util::{hash_file, write_serialized};
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

/// How ties are broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakMode {
    /// Ask on the console.
    Prompt,
    /// Earliest-listed candidate is elected, latest-listed eliminated.
    Roster,
    /// Answers given with `--pick`, in order.
    Scripted,
}

impl FromStr for TieBreakMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(TieBreakMode::Prompt),
            "roster" => Ok(TieBreakMode::Roster),
            "scripted" => Ok(TieBreakMode::Scripted),
            other => Err(format!(
                "unknown tie-break mode `{}` (expected prompt, roster or scripted)",
                other
            )),
        }
    }
}

#[derive(Debug, Args)]
pub struct TabulateArgs {
    #[clap(flatten)]
    pub input: InputArgs,
    #[clap(flatten)]
    pub options: OptionArgs,
    /// Tie-break mode: prompt, roster or scripted
    #[clap(long, default_value = "prompt")]
    pub tie_break: TieBreakMode,
    /// Scripted tie-break answer; repeat for each tie. Implies --tie-break scripted
    #[clap(long = "pick")]
    pub picks: Vec<String>,
    /// Run every round without waiting for <enter>
    #[clap(long)]
    pub no_pause: bool,
    /// Seconds to wait for a prompt answer
    #[clap(long)]
    pub timeout: Option<u64>,
    /// Do not list every ballot each round
    #[clap(long)]
    pub hide_ballots: bool,
    /// Write a JSON report of the count
    #[clap(long)]
    pub report: Option<PathBuf>,
}

impl TabulateArgs {
    fn tie_break_mode(&self) -> TieBreakMode {
        if !self.picks.is_empty() {
            TieBreakMode::Scripted
        } else {
            self.tie_break
        }
    }
}

/// Run the count for a ballot file, printing each round.
pub fn tabulate(args: &TabulateArgs) -> Result<(), CommandError> {
    let ballots_path = &args.input.ballots;
    let reader = args.input.reader_options();
    let election = read_election(ballots_path, &reader)?;
    let options = args.options.resolve()?;

    println!(
        "🗳️  Tabulating {} for {} seats",
        ballots_path.display().to_string().bright_cyan(),
        options.seats.to_string().bright_yellow()
    );

    let timeout = args.timeout.map(Duration::from_secs);
    let mut lines: Option<Rc<LineSource>> = None;
    let mut stdin_lines = || Rc::clone(lines.get_or_insert_with(LineSource::stdin));

    let tie_break: Box<dyn TieBreakProvider> = match args.tie_break_mode() {
        TieBreakMode::Prompt => Box::new(ConsoleTieBreak::new(stdin_lines(), timeout)),
        TieBreakMode::Roster => Box::new(RosterOrderTieBreak::new(election.candidates.clone())),
        TieBreakMode::Scripted => Box::new(ScriptedTieBreak::new(args.picks.clone())),
    };

    let mut tabulator = Tabulator::new(options.clone(), tie_break)
        .with_observer(ConsoleRenderer::stdout(!args.hide_ballots));
    if !args.no_pause {
        tabulator = tabulator.with_round_advance(ConsolePause::new(stdin_lines(), timeout));
    }
    let result = tabulator.tabulate(&election)?;

    println!(
        "\n✅ Elected {} of {} seats in {} rounds",
        result.elected.len().to_string().bright_green().bold(),
        result.seats,
        result.rounds.len()
    );

    if let Some(report_path) = &args.report {
        let sha1 = hash_file(ballots_path).map_err(|source| CommandError::Output {
            path: ballots_path.clone(),
            source,
        })?;
        let info = SourceInfo {
            path: ballots_path.display().to_string(),
            sha1,
            data_format: reader.format.resolve(ballots_path)?.to_string(),
        };
        let report = ElectionReport::new(info, &options, &election, &result);
        write_serialized(report_path, &report).map_err(|source| CommandError::Output {
            path: report_path.clone(),
            source,
        })?;
        println!(
            "📝 Report written to {}",
            report_path.display().to_string().bright_green()
        );
    }

    Ok(())
}
