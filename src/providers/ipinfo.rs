//! Country and organization lookup using ipinfo.io.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::net::IpAddr;

/// Ownership data from ipinfo.io.
///
/// Only the fields the report shows are kept. ipinfo omits fields it has no
/// data for, so all of them default to empty.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct OrgInfo {
  /// Echo of the queried address
  #[serde(default)]
  pub ip: String,

  /// Two-letter country code
  #[serde(default)]
  pub country: String,

  /// Autonomous system and organization, e.g. `AS15169 Google LLC`
  #[serde(default)]
  pub org: String,
}

/// Fetches ownership info for an IP address.
///
/// # Arguments
/// * `base` - Service base URL, normally [`crate::config::IPINFO_URL`]
/// * `ip` - Address to look up
/// * `http_client` - Client carrying the general timeout
///
/// # Errors
/// - Failed or timed-out HTTP request
/// - Non-success status code
/// - Deserialization error
pub async fn fetch_org_info(
  base: &str,
  ip: IpAddr,
  http_client: &Client,
) -> Result<OrgInfo> {
  let url = format!("{}/{ip}/json", base.trim_end_matches('/'));

  let response = http_client
    .get(&url)
    .send()
    .await
    .with_context(|| format!("Failed to send request to {url}"))?;

  if !response.status().is_success() {
    bail!("ipinfo request failed with status: {}", response.status());
  }

  response
    .json::<OrgInfo>()
    .await
    .context("Failed to deserialize ipinfo response")
}
