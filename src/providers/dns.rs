use anyhow::{bail, Result};
use async_trait::async_trait;
use std::net::IpAddr;

use hickory_proto::rr::{Name, RData, RecordType};
use hickory_resolver::{Resolver, TokioResolver};

use super::{HostResolver, ReverseResolver};

/// Handle to the system-configured resolver. Cheap to clone.
#[derive(Clone)]
pub struct SystemDns {
  resolver: TokioResolver,
}

impl SystemDns {
  /// Builds a resolver from the operating system's DNS configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the system configuration cannot be read.
  pub fn new() -> Result<Self> {
    let resolver: TokioResolver = Resolver::builder_tokio()?.build();
    Ok(Self { resolver })
  }
}

#[async_trait]
impl ReverseResolver for SystemDns {
  /// Fails if the query fails or yields no PTR record.
  async fn reverse_names(&self, ip: IpAddr) -> Result<Vec<String>> {
    let names: Vec<String> = self
      .resolver
      .lookup(Name::from(ip), RecordType::PTR)
      .await?
      .iter()
      .filter_map(|r| match r {
        RData::PTR(name) => Some(name.to_string()),
        _ => None,
      })
      .collect();

    if names.is_empty() {
      bail!("no PTR records for {ip}");
    }
    Ok(names)
  }
}

#[async_trait]
impl HostResolver for SystemDns {
  async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>> {
    // A + AAAA
    let ips = self.resolver.lookup_ip(host).await?;
    Ok(ips.iter().map(|ip| ip.to_canonical()).collect())
  }
}
