#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod app;
pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod fanout;
mod logging;
pub mod progress;
pub mod providers;
pub mod report;
pub mod resolve;

#[cfg(test)]
mod testing;

/// Runs the main application logic.
///
/// Parses the command line, resolves the target, enriches every matching
/// address concurrently and prints one report block per address.
///
/// # Errors
///
/// Returns an error if the target is invalid, if it does not resolve to any
/// address, or if the HTTP clients or DNS resolver cannot be built. The
/// caller is expected to print it and exit non-zero.
pub async fn run() -> Result<ExitCode> {
  let cli = match cli::Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let _ = e.print();
      // help and version land here too and are not failures
      return Ok(if e.use_stderr() {
        ExitCode::FAILURE
      } else {
        ExitCode::SUCCESS
      });
    }
  };

  logging::init(cli.verbose);

  let app = app::App::new(cli)?;
  app.run().await
}
