//! External collaborators: system DNS, ipinfo.io and the IRCnet I-line API.

pub mod dns;
pub mod iline;
pub mod ipinfo;

use crate::config::{Endpoints, RunConfig};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

pub use dns::SystemDns;
pub use ipinfo::OrgInfo;

const USER_AGENT: &str = concat!("chick/", env!("CARGO_PKG_VERSION"));

/// Forward resolution of a hostname to its A and AAAA addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
  async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>>;
}

/// PTR lookup of a single address.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
  async fn reverse_names(&self, ip: IpAddr) -> Result<Vec<String>>;
}

/// The three independent lookups run for every address.
#[async_trait]
pub trait Lookups: Send + Sync {
  async fn reverse_names(&self, ip: IpAddr) -> Result<Vec<String>>;
  async fn org_info(&self, ip: IpAddr) -> Result<OrgInfo>;
  async fn network_servers(&self, ip: IpAddr) -> Result<Vec<String>>;
}

/// Production [`Lookups`].
///
/// `http` carries the general timeout and is shared by every ipinfo call;
/// `iline_http` carries the dedicated I-line timeout.
pub struct Providers<D = SystemDns> {
  dns: D,
  http: Client,
  iline_http: Client,
  timeout: Duration,
  endpoints: Endpoints,
}

impl<D: ReverseResolver> Providers<D> {
  /// Builds both HTTP clients from the run configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if either client cannot be built (e.g. TLS backend
  /// initialization fails).
  pub fn new(config: &RunConfig, dns: D) -> Result<Self> {
    let http = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(config.timeout)
      .build()?;
    let iline_http = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(config.iline_timeout)
      .build()?;

    Ok(Self {
      dns,
      http,
      iline_http,
      timeout: config.timeout,
      endpoints: config.endpoints.clone(),
    })
  }
}

#[async_trait]
impl<D: ReverseResolver> Lookups for Providers<D> {
  async fn reverse_names(&self, ip: IpAddr) -> Result<Vec<String>> {
    debug!(%ip, "PTR query");
    tokio::time::timeout(self.timeout, self.dns.reverse_names(ip))
      .await
      .map_err(|_| anyhow!("timed out after {:?}", self.timeout))?
  }

  async fn org_info(&self, ip: IpAddr) -> Result<OrgInfo> {
    debug!(%ip, "ipinfo request");
    ipinfo::fetch_org_info(&self.endpoints.ipinfo, ip, &self.http).await
  }

  async fn network_servers(&self, ip: IpAddr) -> Result<Vec<String>> {
    debug!(%ip, "I-line request");
    iline::fetch_servers(&self.endpoints.iline, ip, &self.iline_http).await
  }
}
