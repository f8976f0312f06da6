use tracing::Level;

/// Installs the stderr diagnostics subscriber. The level comes from the
/// `-v` count only.
pub fn init(verbosity: u8) {
  let level = match verbosity {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  };

  // a subscriber may already be installed when embedded; keep it
  let _ = tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}
