//! Turns the user's target into the list of addresses to enrich.

use crate::config::FamilyFilter;
use crate::error::Error;
use crate::providers::HostResolver;
use std::net::IpAddr;
use tracing::{debug, info};

/// Checks that `target` is an IP literal or a hostname that resolves.
///
/// Runs before, and independently of, [`resolve_target`].
///
/// # Errors
///
/// Returns [`Error::InvalidTarget`] if neither holds.
pub async fn validate_target<R: HostResolver + ?Sized>(
  target: &str,
  resolver: &R,
) -> Result<(), Error> {
  if target.parse::<IpAddr>().is_ok() {
    return Ok(());
  }
  if target.is_empty() {
    return Err(Error::InvalidTarget("empty target".to_string()));
  }
  resolver
    .lookup_host(target)
    .await
    .map(|_| ())
    .map_err(|e| Error::InvalidTarget(format!("{e:#}")))
}

/// An IP literal resolves to itself; anything else goes through DNS.
///
/// # Errors
///
/// Returns [`Error::Resolution`] if the lookup fails or returns nothing.
pub async fn resolve_target<R: HostResolver + ?Sized>(
  target: &str,
  resolver: &R,
) -> Result<Vec<IpAddr>, Error> {
  if let Ok(ip) = target.parse::<IpAddr>() {
    return Ok(vec![ip.to_canonical()]);
  }

  let ips = resolver
    .lookup_host(target)
    .await
    .map_err(|e| Error::Resolution(format!("{e:#}")))?;
  if ips.is_empty() {
    return Err(Error::Resolution(format!("no addresses found for {target}")));
  }
  debug!(target, count = ips.len(), "resolved");
  Ok(ips)
}

/// Keeps the addresses the filter accepts, preserving order and dropping
/// duplicates.
#[must_use]
pub fn filter_family(ips: Vec<IpAddr>, filter: FamilyFilter) -> Vec<IpAddr> {
  let mut kept: Vec<IpAddr> = Vec::with_capacity(ips.len());
  for ip in ips {
    if filter.accepts(ip) && !kept.contains(&ip) {
      kept.push(ip);
    }
  }
  kept
}

/// Validation, resolution and filtering, in that order.
///
/// # Errors
///
/// Propagates [`Error::InvalidTarget`] and [`Error::Resolution`].
pub async fn resolve<R: HostResolver + ?Sized>(
  target: &str,
  filter: FamilyFilter,
  resolver: &R,
) -> Result<Vec<IpAddr>, Error> {
  validate_target(target, resolver).await?;
  let ips = resolve_target(target, resolver).await?;
  let kept = filter_family(ips, filter);
  info!(target, addresses = kept.len(), "addresses to check");
  Ok(kept)
}
