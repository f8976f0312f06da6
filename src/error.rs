use std::fmt;
use thiserror::Error;

/// Fatal errors. Both abort the run before any lookup is started.
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid domain or IP address: {0}")]
  InvalidTarget(String),
  #[error("cannot resolve domain: {0}")]
  Resolution(String),
}

/// The three per-address lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubLookup {
  Ptr,
  OrgInfo,
  NetworkInfo,
}

impl SubLookup {
  const fn prefix(self) -> &'static str {
    match self {
      Self::Ptr => "PTR lookup failed",
      Self::OrgInfo => "IP info fetch failed",
      Self::NetworkInfo => "network-info fetch failed",
    }
  }
}

/// One failed sub-lookup. Never fatal; rendered under its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
  pub lookup: SubLookup,
  pub detail: String,
}

impl LookupFailure {
  pub fn new(lookup: SubLookup, err: &anyhow::Error) -> Self {
    Self {
      lookup,
      detail: format!("{err:#}"),
    }
  }
}

impl fmt::Display for LookupFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.lookup.prefix(), self.detail)
  }
}
