//! Per-address enrichment: PTR, ipinfo and I-line lookups run together and
//! are merged into one [`EnrichmentRecord`].

use crate::error::{LookupFailure, SubLookup};
use crate::providers::{Lookups, OrgInfo};
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
  V4,
  V6,
}

impl AddressFamily {
  #[must_use]
  pub const fn of(ip: IpAddr) -> Self {
    match ip {
      IpAddr::V4(_) => Self::V4,
      IpAddr::V6(_) => Self::V6,
    }
  }

  /// DNS record type the address came from.
  #[must_use]
  pub const fn record_type(self) -> &'static str {
    match self {
      Self::V4 => "A",
      Self::V6 => "AAAA",
    }
  }
}

/// Everything learned about one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentRecord {
  pub address: IpAddr,
  pub family: AddressFamily,
  pub reverse_names: Vec<String>,
  pub org_info: Option<OrgInfo>,
  pub network_servers: Vec<String>,
  pub failures: Vec<LookupFailure>,
}

impl EnrichmentRecord {
  #[must_use]
  pub const fn new(address: IpAddr) -> Self {
    Self {
      address,
      family: AddressFamily::of(address),
      reverse_names: Vec::new(),
      org_info: None,
      network_servers: Vec::new(),
      failures: Vec::new(),
    }
  }

  /// All failure fragments joined with `"; "`, or `None` if every lookup
  /// succeeded.
  #[must_use]
  pub fn failure(&self) -> Option<String> {
    if self.failures.is_empty() {
      return None;
    }
    Some(
      self
        .failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; "),
    )
  }
}

/// Runs the three lookups for `address` concurrently and waits for all of
/// them. A failing lookup never cancels or skips the other two.
pub async fn enrich<L: Lookups + ?Sized>(
  lookups: &L,
  address: IpAddr,
) -> EnrichmentRecord {
  let (ptr, org, iline) = tokio::join!(
    lookups.reverse_names(address),
    lookups.org_info(address),
    lookups.network_servers(address),
  );

  let mut record = EnrichmentRecord::new(address);
  match ptr {
    Ok(names) => record.reverse_names = names,
    Err(e) => record.failures.push(LookupFailure::new(SubLookup::Ptr, &e)),
  }
  match org {
    Ok(info) => record.org_info = Some(info),
    Err(e) => record
      .failures
      .push(LookupFailure::new(SubLookup::OrgInfo, &e)),
  }
  match iline {
    Ok(servers) => record.network_servers = servers,
    Err(e) => record
      .failures
      .push(LookupFailure::new(SubLookup::NetworkInfo, &e)),
  }

  debug!(
    %address,
    failures = record.failures.len(),
    "address enriched"
  );
  record
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::FakeLookups;
  use std::time::Duration;
  use tokio::time::Instant;

  fn ip() -> IpAddr {
    "1.2.3.4".parse().unwrap()
  }

  #[tokio::test]
  async fn all_lookups_succeed() {
    let record = enrich(&FakeLookups::happy(), ip()).await;
    assert_eq!(record.family, AddressFamily::V4);
    assert_eq!(record.reverse_names, ["host.example.com"]);
    assert_eq!(
      record.org_info.as_ref().map(|o| o.org.as_str()),
      Some("AS1234 Example Org")
    );
    assert_eq!(
      record.network_servers,
      ["irc1.example.net", "irc2.example.net"]
    );
    assert!(record.failure().is_none());
  }

  #[tokio::test]
  async fn all_lookups_fail() {
    let record = enrich(&FakeLookups::failing(), ip()).await;
    assert!(record.reverse_names.is_empty());
    assert!(record.org_info.is_none());
    assert!(record.network_servers.is_empty());

    let failure = record.failure().expect("failure message");
    assert!(failure.contains("PTR lookup failed"), "{failure}");
    assert!(failure.contains("IP info fetch failed"), "{failure}");
    assert!(failure.contains("network-info fetch failed"), "{failure}");
    assert_eq!(failure.matches("; ").count(), 2);
  }

  #[tokio::test]
  async fn partial_failure_keeps_other_results() {
    let lookups = FakeLookups {
      org: Err("rate limited".into()),
      ..FakeLookups::happy()
    };
    let record = enrich(&lookups, ip()).await;
    assert_eq!(record.reverse_names, ["host.example.com"]);
    assert!(record.org_info.is_none());
    assert_eq!(record.network_servers.len(), 2);
    assert_eq!(
      record.failure().as_deref(),
      Some("IP info fetch failed: rate limited")
    );
  }

  #[tokio::test]
  async fn empty_server_list_is_not_a_failure() {
    let lookups = FakeLookups {
      network: Ok(vec![]),
      ..FakeLookups::happy()
    };
    let record = enrich(&lookups, ip()).await;
    assert!(record.network_servers.is_empty());
    assert!(record.failure().is_none());
  }

  #[tokio::test(start_paused = true)]
  async fn waits_for_the_slowest_lookup() {
    let lookups = FakeLookups {
      delays: [
        Duration::from_millis(20),
        Duration::from_millis(300),
        Duration::from_millis(80),
      ],
      ..FakeLookups::failing()
    };
    let started = Instant::now();
    let record = enrich(&lookups, ip()).await;
    assert!(started.elapsed() >= Duration::from_millis(300));
    // lookups overlap rather than running back to back
    assert!(started.elapsed() < Duration::from_millis(400));
    assert_eq!(record.failures.len(), 3);
  }

  #[test]
  fn record_type_follows_family() {
    let v6: IpAddr = "2001:db8::1".parse().unwrap();
    assert_eq!(EnrichmentRecord::new(v6).family.record_type(), "AAAA");
    assert_eq!(EnrichmentRecord::new(ip()).family.record_type(), "A");
  }
}
