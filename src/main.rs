mod commands;

use crate::commands::{info, tabulate, InfoArgs, TabulateArgs};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Opts {
    /// Logging filter, `<target>=<level>` or a bare level, e.g. -lranked-stv=debug.
    #[clap(long, short, default_value = "warn")]
    log: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a ballot file and dump info about it.
    Info(InfoArgs),
    /// Run the STV count round by round.
    Tabulate(TabulateArgs),
}

fn main() {
    let opts = Opts::parse();

    let directive = match opts.log.parse() {
        Ok(directive) => directive,
        Err(e) => {
            eprintln!("❌ Invalid log filter `{}`: {}", opts.log, e);
            std::process::exit(1);
        }
    };
    let filter = EnvFilter::from_default_env().add_directive(directive);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match opts.command {
        Command::Info(args) => {
            if let Err(e) = info(&args) {
                eprintln!("❌ Info failed: {}", e);
                std::process::exit(1);
            }
        }
        Command::Tabulate(args) => {
            if let Err(e) = tabulate(&args) {
                eprintln!("❌ Tabulation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
