use crate::cli::Cli;
use crate::config::RunConfig;
use crate::fanout::{self, Outcome};
use crate::progress::Progress;
use crate::providers::{HostResolver, Lookups, Providers, SystemDns};
use crate::report::{Palette, Presenter};
use crate::resolve;
use anyhow::Result;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub struct App<R, L: ?Sized> {
  config: RunConfig,
  resolver: R,
  lookups: Arc<L>,
  presenter: Presenter,
  progress: fn(usize) -> Progress,
}

impl App<SystemDns, Providers> {
  pub fn new(cli: Cli) -> Result<Self> {
    let config = RunConfig::from(&cli);
    let dns = SystemDns::new()?;
    let lookups = Arc::new(Providers::new(&config, dns.clone())?);

    Ok(Self {
      config,
      resolver: dns,
      lookups,
      presenter: Presenter::new(Palette::colored()),
      progress: Progress::stdout,
    })
  }
}

impl<R, L> App<R, L>
where
  R: HostResolver,
  L: Lookups + ?Sized + 'static,
{
  /// Runs against stdout, cancelling on Ctrl-C or SIGTERM.
  pub async fn run(&self) -> Result<ExitCode> {
    let cancel = CancellationToken::new();
    let signals = tokio::spawn(cancel_on_signal(cancel.clone()));

    let result = self.run_with(cancel, &mut io::stdout()).await;
    signals.abort();
    result.map(|()| ExitCode::SUCCESS)
  }

  /// Resolves the target, enriches every address and writes the report.
  ///
  /// Target and resolution errors are returned before anything is
  /// written. Per-address lookup failures are part of the report.
  /// Cancellation is honored during resolution as well as enrichment.
  pub async fn run_with<W: Write>(
    &self,
    cancel: CancellationToken,
    out: &mut W,
  ) -> Result<()> {
    let resolved = tokio::select! {
      biased;
      () = cancel.cancelled() => None,
      resolved = resolve::resolve(
        &self.config.target,
        self.config.family,
        &self.resolver,
      ) => Some(resolved),
    };
    let Some(resolved) = resolved else {
      self.presenter.write_cancelled(out)?;
      return Ok(());
    };
    let addresses = resolved?;

    if addresses.is_empty() {
      self.presenter.write_no_match(out, &self.config.target)?;
      return Ok(());
    }

    let progress = (self.progress)(addresses.len());
    let outcome =
      fanout::run(Arc::clone(&self.lookups), addresses, cancel, &progress)
        .await;

    match outcome {
      Outcome::Completed(records) => self.presenter.write_all(out, &records)?,
      Outcome::Cancelled => self.presenter.write_cancelled(out)?,
    }
    out.flush()?;
    Ok(())
  }
}

// the presenter prints the notice after the progress line is abandoned
async fn cancel_on_signal(cancel: CancellationToken) {
  interrupted().await;
  cancel.cancel();
}

#[cfg(unix)]
async fn interrupted() {
  use tokio::signal::unix::{signal, SignalKind};

  match signal(SignalKind::terminate()) {
    Ok(mut term) => {
      tokio::select! {
        () = ctrl_c() => {}
        _ = term.recv() => {}
      }
    }
    Err(e) => {
      warn!("cannot listen for SIGTERM: {e}");
      ctrl_c().await;
    }
  }
}

#[cfg(not(unix))]
async fn interrupted() {
  ctrl_c().await;
}

async fn ctrl_c() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!("cannot listen for Ctrl-C: {e}");
    std::future::pending::<()>().await;
  }
}
