//! IRCnet I-line lookup: which servers accept clients from an address.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::net::IpAddr;

/// Value of `status` the API sends when `response` can be trusted.
pub const SUCCESS: &str = "SUCCESS";

#[derive(Debug, Deserialize)]
struct ApiResponse {
  status: String,
  // `null` and a missing key both mean no servers
  #[serde(default)]
  response: Option<Vec<Server>>,
}

#[derive(Debug, Deserialize)]
struct Server {
  #[serde(rename = "serverName", default)]
  server_name: String,
}

/// Fetches the names of the servers holding an I-line for `ip`.
///
/// An empty list is a valid answer, and so is a `null` list. Entries without
/// a server name are skipped. Any `status` other than [`SUCCESS`] is an error
/// even when the body is otherwise well formed.
///
/// # Errors
///
/// - If the request fails or exceeds the client's timeout.
/// - If the body is not the expected JSON.
/// - If the API reports a non-success status.
pub async fn fetch_servers(
  base: &str,
  ip: IpAddr,
  client: &Client,
) -> Result<Vec<String>> {
  let resp = client
    .get(base)
    .query(&[("q", ip.to_string())])
    .send()
    .await
    .context("Failed to call I-line API")?;

  let body = resp.bytes().await.context("Failed to read I-line body")?;
  parse_servers(&body)
}

fn parse_servers(body: &[u8]) -> Result<Vec<String>> {
  let parsed: ApiResponse =
    serde_json::from_slice(body).context("Invalid I-line JSON")?;

  if parsed.status != SUCCESS {
    bail!(
      "failed to get network-info data (status: {})",
      parsed.status
    );
  }

  Ok(
    parsed
      .response
      .unwrap_or_default()
      .into_iter()
      .map(|s| s.server_name)
      .filter(|name| !name.is_empty())
      .collect(),
  )
}
