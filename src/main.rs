//! `multistart` entrypoint.
//!
//! A thin wrapper over the collaborators: parse the command line through
//! `multistart_args`, start the requested number of processes, and tile their main
//! windows across the target screen. On a parse failure the rendered usage block is
//! the sole output.

use std::env;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod launch;
mod params;
mod platform;
mod tile;

use crate::error::Error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

    match run(&tokens) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(tokens: &[&str]) -> Result<(), Error> {
    let params = params::load(tokens)?;
    info!(
        command = %params.command,
        count = params.count,
        screen = params.screen,
        "starting processes"
    );

    let children = launch::start_all(&params)?;
    tile::arrange(&children, params.screen)?;

    Ok(())
}
