use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use commitkit::{cli, commands, logging};
use commitkit::logging::ConsoleOutput;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    match args.command {
        cli::Command::Setup(opts) => {
            logging::init_subscriber(args.verbose, "setup", ConsoleOutput::Split);
            let log = Arc::new(logging::Logger::new("setup"));
            commands::setup::run(&args.global, &opts, &log)
        }
        cli::Command::Config => {
            logging::init_subscriber(args.verbose, "config", ConsoleOutput::Stderr);
            let log = logging::Logger::new("config");
            commands::config::run(&args.global, &log)
        }
        cli::Command::Completions(opts) => {
            commands::completions::run(&opts);
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
