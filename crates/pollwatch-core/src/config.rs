// ── Runtime monitor configuration ──
//
// Describes *what* to watch and *how often*. Never touches disk or the
// environment: the binary builds a `MonitorConfig` and hands it in.

use std::num::NonZeroU64;
use std::time::Duration;

use url::Url;

use crate::reconcile::ReconcilePolicy;

/// Protocol module whose networks are monitored.
pub const DEFAULT_PLUGIN: &str = "module-core-modbus";

/// Pause between the end of one cycle and the start of the next.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// A scheduled snapshot refresh happens on every Nth cycle, starting with the first.
pub const DEFAULT_REFRESH_EVERY: NonZeroU64 = NonZeroU64::MIN.saturating_add(4);

/// Consecutive mismatching cycles before the mismatch is reported.
pub const DEFAULT_ESCALATE_AFTER: u32 = 2;

/// Configuration for one monitor run.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// API root (e.g., `http://192.168.15.10:1660`).
    pub base_url: Url,
    /// Plugin name networks must carry to be monitored.
    pub plugin_name: String,
    /// Sleep between cycles.
    pub interval: Duration,
    /// Scheduled snapshot refresh cadence, in cycles.
    pub refresh_every: NonZeroU64,
    /// Mismatch streak length at which the report escalates.
    pub escalate_after: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl MonitorConfig {
    /// Config with the fixed production parameters for the given API root.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            plugin_name: DEFAULT_PLUGIN.into(),
            interval: DEFAULT_INTERVAL,
            refresh_every: DEFAULT_REFRESH_EVERY,
            escalate_after: DEFAULT_ESCALATE_AFTER,
            timeout: Duration::from_secs(30),
        }
    }

    /// Parse an `host:port` address into a plain-HTTP config.
    pub fn from_host_port(addr: &str) -> Result<Self, crate::CoreError> {
        let url = Url::parse(&format!("http://{addr}")).map_err(|e| crate::CoreError::Config {
            message: format!("invalid address '{addr}': {e}"),
        })?;
        Ok(Self::new(url))
    }

    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            refresh_every: self.refresh_every,
            escalate_after: self.escalate_after,
        }
    }
}
