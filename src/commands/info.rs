use super::{CommandError, InputArgs, OptionArgs};
use clap::Args;
use colored::*;
use itertools::Itertools;
use ranked_stv::formats::read_election;
use ranked_stv::model::Election;
use ranked_stv::tabulator::{compute_quota, validate_election};

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[clap(flatten)]
    pub input: InputArgs,
    #[clap(flatten)]
    pub options: OptionArgs,
}

/// What the ballots look like before any count.
#[derive(Debug, PartialEq)]
struct BallotProfile {
    /// Roster order.
    first_preferences: Vec<(String, usize)>,
    /// Ballots per number of ranked candidates, ascending.
    depths: Vec<(usize, usize)>,
    blank: usize,
}

impl BallotProfile {
    fn new(election: &Election) -> BallotProfile {
        let first_choices = election.ballots.iter().filter_map(|b| b.first()).counts();
        let first_preferences = election
            .candidates
            .iter()
            .map(|c| (c.clone(), first_choices.get(c).copied().unwrap_or(0)))
            .collect();
        let depths = election
            .ballots
            .iter()
            .map(|b| b.len())
            .counts()
            .into_iter()
            .sorted()
            .collect();

        BallotProfile {
            first_preferences,
            depths,
            blank: election.blank_ballot_count(),
        }
    }
}

/// Validate a ballot file and dump what the count will work with.
///
/// Problems that would stop a count are reported, not returned: only an
/// unreadable ballot or options file fails the command.
pub fn info(args: &InfoArgs) -> Result<(), CommandError> {
    let election = read_election(&args.input.ballots, &args.input.reader_options())?;
    let options = args.options.resolve()?;
    let profile = BallotProfile::new(&election);

    println!(
        "📋 {} ({} candidates, {} ballots)",
        args.input.ballots.display().to_string().bright_cyan(),
        election.candidates.len().to_string().bright_yellow(),
        election.ballot_count().to_string().bright_yellow()
    );

    println!("\n{}", "[First preferences]".bright_cyan());
    for (candidate, count) in &profile.first_preferences {
        println!("  {} = {}", candidate, count);
    }

    println!("\n{}", "[Ranking depth]".bright_cyan());
    for (depth, count) in &profile.depths {
        println!("  {} ranked: {} ballots", depth, count);
    }
    if profile.blank > 0 {
        println!("  ({} ballots rank nobody)", profile.blank);
    }

    println!("\n{}", "[Count]".bright_cyan());
    println!("  Seats = {}", options.seats);
    match compute_quota(election.ballot_count(), options.seats) {
        Ok(quota) => println!("  Quota = {}", quota.to_string().bright_yellow()),
        Err(e) => println!("  Quota = {} ({})", "n/a".bright_red(), e),
    }

    match options
        .validate()
        .and_then(|_| validate_election(&election, options.seats))
    {
        Ok(()) => println!("\n✅ Ready to tabulate"),
        Err(e) => println!("\n⚠️  Cannot tabulate: {}", e.to_string().bright_red()),
    }

    Ok(())
}
