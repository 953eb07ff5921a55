//! Clap derive structures for the `pollwatch` CLI.
//!
//! The only input is the API address; every other parameter is fixed.

use std::fmt;
use std::str::FromStr;

use clap::Parser;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pollwatch -- checks live Modbus polling counts against configured points
#[derive(Debug, Parser)]
#[command(
    name = "pollwatch",
    version,
    about = "Check that the Modbus polling engine holds every enabled point",
    long_about = "Every 5 seconds, sums the poll queue, standby list and in-flight \
        counters of each Modbus network and compares the total with the number of \
        enabled points in the configuration. A mismatch that survives a \
        configuration refresh is reported as INCORRECT COUNT.\n\n\
        Runs until interrupted. Any failed request ends the run."
)]
pub struct Cli {
    /// API address, e.g. 192.168.15.10:1660
    #[arg(value_name = "HOST:PORT")]
    pub address: HostPort,
}

// ── Address ──────────────────────────────────────────────────────────

/// A `host:port` pair. The host may be a name, an IPv4 address, or a
/// bracketed IPv6 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: u16,
}

impl FromStr for HostPort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected HOST:PORT (e.g. 192.168.15.10:1660), got '{s}'"))?;

        if host.is_empty() {
            return Err("host must not be empty".into());
        }
        if host.contains(['/', '?', '#', '@']) || host.contains(char::is_whitespace) {
            return Err(format!("invalid host '{host}'"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| format!("invalid port '{port}'"))?;

        Ok(Self {
            host: host.to_owned(),
            port,
        })
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
