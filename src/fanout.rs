//! Runs one enrichment task per address and collects the records.

use crate::enrich::{enrich, EnrichmentRecord};
use crate::progress::Progress;
use crate::providers::Lookups;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Capacity of the task-to-collector channel.
pub const HANDOFF_CAPACITY: usize = 10;
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub enum Outcome {
  /// Every task finished; records are in arrival order.
  Completed(Vec<EnrichmentRecord>),
  /// The run was interrupted. Collected records are discarded.
  Cancelled,
}

/// Enriches every address concurrently until all are done or `cancel` fires.
///
/// All tasks start immediately. On cancellation the outstanding tasks are
/// aborted, which drops their in-flight DNS and HTTP requests.
pub async fn run<L>(
  lookups: Arc<L>,
  addresses: Vec<IpAddr>,
  cancel: CancellationToken,
  progress: &Progress,
) -> Outcome
where
  L: Lookups + ?Sized + 'static,
{
  let total = addresses.len();
  let (tx, mut rx) = mpsc::channel::<EnrichmentRecord>(HANDOFF_CAPACITY);
  let mut tasks = JoinSet::new();

  for address in addresses {
    let tx = tx.clone();
    let lookups = Arc::clone(&lookups);
    let cancel = cancel.clone();
    tasks.spawn(async move {
      tokio::select! {
        () = cancel.cancelled() => {}
        record = enrich(lookups.as_ref(), address) => {
          let _ = tx.send(record).await;
        }
      }
    });
  }
  drop(tx);
  debug!(total, "enrichment tasks started");

  let mut ticker = interval(PROGRESS_INTERVAL);
  ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
  let mut records = Vec::with_capacity(total);

  loop {
    tokio::select! {
      biased;
      () = cancel.cancelled() => {
        tasks.abort_all();
        progress.abandon();
        debug!(collected = records.len(), total, "run cancelled");
        return Outcome::Cancelled;
      }
      received = rx.recv() => match received {
        Some(record) => records.push(record),
        None => break,
      },
      _ = ticker.tick() => progress.update(records.len()),
    }
  }

  progress.update(records.len());
  progress.clear();

  // every sender is gone, so this only reaps finished tasks
  while let Some(joined) = tasks.join_next().await {
    if let Err(e) = joined {
      warn!("enrichment task failed: {e}");
    }
  }

  Outcome::Completed(records)
}
