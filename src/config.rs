//! Immutable per-run configuration derived from the command line.

use crate::cli::Cli;
use std::net::IpAddr;
use std::time::Duration;

pub const IPINFO_URL: &str = "https://ipinfo.io";
pub const ILINE_URL: &str = "https://bot.ircnet.info/api/i-line";

/// Which address families survive resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyFilter {
  pub ipv4: bool,
  pub ipv6: bool,
}

impl FamilyFilter {
  /// No flag set means both families are kept.
  #[must_use]
  pub const fn accepts(self, ip: IpAddr) -> bool {
    match ip {
      IpAddr::V4(_) => self.ipv4 || !self.ipv6,
      IpAddr::V6(_) => self.ipv6 || !self.ipv4,
    }
  }
}

/// Base URLs of the two HTTP services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub ipinfo: String,
  pub iline: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      ipinfo: IPINFO_URL.to_string(),
      iline: ILINE_URL.to_string(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
  pub target: String,
  pub family: FamilyFilter,
  /// Bounds PTR queries and ipinfo requests.
  pub timeout: Duration,
  /// Bounds I-line requests only.
  pub iline_timeout: Duration,
  pub endpoints: Endpoints,
}

impl From<&Cli> for RunConfig {
  fn from(cli: &Cli) -> Self {
    Self {
      target: cli.target.trim().to_string(),
      family: FamilyFilter {
        ipv4: cli.ipv4,
        ipv6: cli.ipv6,
      },
      timeout: cli.timeout,
      iline_timeout: cli.iline_timeout,
      endpoints: Endpoints::default(),
    }
  }
}
