use clap::Parser;
use std::io;
use std::process::ExitCode;
use wordfreq_cli::args::{Args, Command};
use wordfreq_cli::config::{Config, SeedSearchConfig};
use wordfreq_cli::error::Result;
use wordfreq_cli::presentation;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = presentation::init_logger(args.verbose) {
        eprintln!("{e}");
    }

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn execute(mut args: Args) -> Result<()> {
    match args.command.take() {
        Some(Command::SeedSearch(search)) => {
            let config = SeedSearchConfig::from(search);
            let found = wordfreq_engine::seed_search(&config)?;
            if found.is_empty() {
                log::warn!(
                    "no seed in {}..={} fits the input",
                    config.first_seed,
                    config.last_seed
                );
            }
            presentation::write_candidates(io::stdout().lock(), &found)
        }
        None => {
            let config = Config::try_from(&args)?;
            let report = wordfreq_engine::run(&config)?;
            if args.output.summary {
                presentation::print_summary(&report);
            }
            Ok(())
        }
    }
}
