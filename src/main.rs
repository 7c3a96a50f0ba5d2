use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use motus_rust::cli::{Command, DisplayArgs};
use motus_rust::{config, displayer_from_options, logging, Cli, Options};

/// Commit id baked in at build time
const GIT_COMMIT_ID: &str = match option_env!("MOTUS_GIT_COMMIT") {
    Some(id) => id,
    None => "unknown",
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let options = config::load_config(&cli.configdir)?;
    let options = cli.merge_into_options(options)?;

    logging::init(options.log_level);
    tracing::debug!("options: {:?}", options);

    match cli.command {
        Command::Version => {
            println!("Git Commit: {}", GIT_COMMIT_ID);
            Ok(())
        }
        Command::Display(ref args) => display(args, &options),
    }
}

fn display(args: &DisplayArgs, options: &Options) -> Result<()> {
    let mut displayer = displayer_from_options(options);
    let outcome = displayer.display_text(
        &mut io::stdout().lock(),
        &args.txt,
        args.ok_count,
        args.amiss_count,
    )?;

    if let Some(e) = outcome.sound_error {
        tracing::warn!("sound disabled: {}", e);
    }
    Ok(())
}
