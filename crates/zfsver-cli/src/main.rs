mod commands;
mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use tracing::debug;
use zfsver_core::{config, Error, TimestampZone, VersionFinder};

const EXIT_USAGE: u8 = 1;

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(lines) => {
            let mut stdout = io::stdout().lock();
            for line in lines {
                if writeln!(stdout, "{}", line).is_err() {
                    break;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Cli) -> Result<Vec<String>, Error> {
    let mut config = config::load_configuration(args.config.as_deref())?;
    if args.utc {
        config.timestamps = TimestampZone::Utc;
    }
    debug!("Configuration: {:?}", config);

    let report = VersionFinder::new(config).find(&args.file)?;
    Ok(report.render(args.verbose))
}

fn exit_code(err: &Error) -> u8 {
    match err {
        Error::PathResolution { .. } => 2,
        Error::NotFound(_) | Error::NotRegularFile(_) => 3,
        Error::SnapshotListing { .. } => 5,
        Error::Config(_) => 6,
        Error::NoSnapshotRoot { .. } => 7,
        Error::RelativePath { .. } => 8,
    }
}
