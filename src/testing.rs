//! Scripted DNS/HTTP collaborators shared by the unit tests.

use crate::providers::{HostResolver, Lookups, OrgInfo};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct FakeDns {
  hosts: HashMap<String, Vec<IpAddr>>,
  broken: bool,
  stalled: bool,
  calls: AtomicUsize,
}

impl FakeDns {
  /// Every lookup fails.
  pub fn broken() -> Self {
    Self {
      broken: true,
      ..Self::default()
    }
  }

  /// Every lookup hangs.
  pub fn stalled() -> Self {
    Self {
      stalled: true,
      ..Self::default()
    }
  }

  pub fn with_host(mut self, host: &str, ips: Vec<IpAddr>) -> Self {
    self.hosts.insert(host.to_string(), ips);
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl HostResolver for FakeDns {
  async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.stalled {
      std::future::pending::<()>().await;
    }
    if self.broken {
      return Err(anyhow!("resolver unavailable"));
    }
    self
      .hosts
      .get(host)
      .cloned()
      .ok_or_else(|| anyhow!("no such host: {host}"))
  }
}

/// Same answers for every address; `delays` are PTR, ipinfo, I-line.
/// Addresses in `lag` wait that much longer before each lookup; addresses
/// in `stalled` never answer.
pub struct FakeLookups {
  pub reverse: Result<Vec<String>, String>,
  pub org: Result<OrgInfo, String>,
  pub network: Result<Vec<String>, String>,
  pub delays: [Duration; 3],
  pub lag: Vec<(IpAddr, Duration)>,
  pub stalled: Vec<IpAddr>,
}

impl FakeLookups {
  pub fn happy() -> Self {
    Self {
      reverse: Ok(vec!["host.example.com".into()]),
      org: Ok(OrgInfo {
        ip: "1.2.3.4".into(),
        country: "US".into(),
        org: "AS1234 Example Org".into(),
      }),
      network: Ok(vec!["irc1.example.net".into(), "irc2.example.net".into()]),
      delays: [Duration::ZERO; 3],
      lag: Vec::new(),
      stalled: Vec::new(),
    }
  }

  pub fn failing() -> Self {
    Self {
      reverse: Err("no such host".into()),
      org: Err("connection refused".into()),
      network: Err("failed to get network-info data (status: FAIL)".into()),
      delays: [Duration::ZERO; 3],
      lag: Vec::new(),
      stalled: Vec::new(),
    }
  }

  async fn pause(&self, ip: IpAddr, delay: Duration) {
    if self.stalled.contains(&ip) {
      std::future::pending::<()>().await;
    }
    let extra = self
      .lag
      .iter()
      .find(|(lagging, _)| *lagging == ip)
      .map_or(Duration::ZERO, |(_, d)| *d);
    let delay = delay + extra;
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }
  }
}

#[async_trait]
impl Lookups for FakeLookups {
  async fn reverse_names(&self, ip: IpAddr) -> Result<Vec<String>> {
    self.pause(ip, self.delays[0]).await;
    self.reverse.clone().map_err(|e| anyhow!(e))
  }

  async fn org_info(&self, ip: IpAddr) -> Result<OrgInfo> {
    self.pause(ip, self.delays[1]).await;
    self.org.clone().map_err(|e| anyhow!(e))
  }

  async fn network_servers(&self, ip: IpAddr) -> Result<Vec<String>> {
    self.pause(ip, self.delays[2]).await;
    self.network.clone().map_err(|e| anyhow!(e))
  }
}

pub fn http_client() -> reqwest::Client {
  reqwest::Client::builder()
    .timeout(Duration::from_secs(5))
    .build()
    .expect("test client")
}

/// Answers a single HTTP request with `status` and a JSON `body`, then
/// closes. Returns the base URL.
pub async fn serve_once(status: u16, body: &'static str) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let addr = listener.local_addr().expect("local addr");
  tokio::spawn(async move {
    if let Ok((mut socket, _)) = listener.accept().await {
      let mut buf = vec![0u8; 8192];
      let _ = socket.read(&mut buf).await;
      let response = format!(
        "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
      );
      let _ = socket.write_all(response.as_bytes()).await;
      let _ = socket.shutdown().await;
    }
  });
  format!("http://{addr}")
}

/// Accepts connections and never answers.
pub async fn serve_silent() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let addr = listener.local_addr().expect("local addr");
  tokio::spawn(async move {
    let mut held = Vec::new();
    while let Ok((socket, _)) = listener.accept().await {
      held.push(socket);
    }
  });
  format!("http://{addr}")
}
