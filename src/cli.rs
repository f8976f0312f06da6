use clap::{ArgAction, Parser};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "chick", version)]
#[command(
  about = "Extended DNS check: PTR records, IP info and IRCnet I-lines for a domain or IP.",
  long_about = "Resolves a domain, subdomain or IP address and, for every A and AAAA record found, looks up its PTR records, fetches country and organization details from ipinfo.io and lists the IRCnet servers that have an I-line for it."
)]
pub struct Cli {
  /// Domain, subdomain or IP to check.
  #[arg(value_name = "domain/ip")]
  pub target: String,

  /// Show only IPv4 (A) records.
  #[arg(short = '4', long = "ipv4")]
  pub ipv4: bool,

  /// Show only IPv6 (AAAA) records.
  #[arg(short = '6', long = "ipv6")]
  pub ipv6: bool,

  /// Timeout for PTR queries and ipinfo.io requests (e.g. `5s`, `1m30s`).
  #[arg(long, default_value = "5s", value_parser = parse_duration, value_name = "DURATION")]
  pub timeout: Duration,

  /// Timeout for I-line API requests.
  #[arg(long = "iline-timeout", default_value = "10s", value_parser = parse_duration, value_name = "DURATION")]
  pub iline_timeout: Duration,

  /// Print diagnostics to stderr (-v info, -vv debug, -vvv trace).
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,
}

/// Parses a duration such as `300ms`, `1.5s` or `1h2m3s`.
///
/// Every component is a decimal number followed by one of `ns`, `us`, `µs`,
/// `ms`, `s`, `m` or `h`. A bare `0` is accepted by the grammar but rejected
/// because a zero timeout would fail every request.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
  let s = input.trim();
  if s.is_empty() {
    return Err("empty duration".to_string());
  }
  if s == "0" {
    return Err("duration must be greater than zero".to_string());
  }

  let mut total = 0f64;
  let mut rest = s;
  while !rest.is_empty() {
    let num_len = rest
      .find(|c: char| !(c.is_ascii_digit() || c == '.'))
      .unwrap_or(rest.len());
    if num_len == 0 {
      return Err(format!("invalid duration {input:?}: expected a number"));
    }
    let value: f64 = rest[..num_len]
      .parse()
      .map_err(|_| format!("invalid duration {input:?}"))?;
    rest = &rest[num_len..];

    let unit_len = rest
      .find(|c: char| c.is_ascii_digit() || c == '.')
      .unwrap_or(rest.len());
    let nanos_per_unit = match &rest[..unit_len] {
      "ns" => 1.0,
      "us" | "µs" => 1e3,
      "ms" => 1e6,
      "s" => 1e9,
      "m" => 60e9,
      "h" => 3600e9,
      "" => return Err(format!("missing unit in duration {input:?}")),
      other => {
        return Err(format!("unknown unit {other:?} in duration {input:?}"))
      }
    };
    rest = &rest[unit_len..];
    total += value * nanos_per_unit;
  }

  if total < 1.0 {
    return Err("duration must be greater than zero".to_string());
  }
  #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  Ok(Duration::from_nanos(total as u64))
}
