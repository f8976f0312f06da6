#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use chick::run;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
  // Install the default crypto provider for rustls
  let _ = rustls::crypto::ring::default_provider().install_default();

  match run().await {
    Ok(code) => code,
    Err(e) => {
      chick::report::print_fatal(&e);
      ExitCode::FAILURE
    }
  }
}
