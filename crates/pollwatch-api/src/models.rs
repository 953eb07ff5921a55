// API response types
//
// Models for the device-management JSON API. Fields use `#[serde(default)]`
// liberally because the server omits empty collections and unset flags
// depending on which query parameters were passed.

use serde::{Deserialize, Serialize};

// ── Configuration tree ───────────────────────────────────────────────

/// Network object from `GET /api/networks`.
///
/// Without `with_devices=true` the `devices` array is absent; with it,
/// each device carries its own `points` when `with_points=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub uuid: String,
    pub name: String,
    /// Absent in some tree responses; an empty value matches no plugin.
    #[serde(default)]
    pub plugin_name: String,
    #[serde(default)]
    pub enable: Option<bool>,
    #[serde(default)]
    pub devices: Vec<Device>,
    /// Catch-all for fields this client does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Device object nested inside [`Network`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enable: Option<bool>,
    #[serde(default)]
    pub points: Vec<Point>,
}

/// Point object nested inside [`Device`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enable: Option<bool>,
}

// ── Polling statistics ───────────────────────────────────────────────

/// Polling-queue statistics for one network, from
/// `GET /api/modules/{plugin}/api/polling/stats/network/name/{name}`.
///
/// The three totals and `enable` are always present. Durations are
/// rendered server-side as Go duration strings (e.g. `"1.5s"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollQueueStatistics {
    pub enable: bool,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub plugin_name: Option<String>,

    // Queue occupancy
    pub total_poll_queue_length: i64,
    pub total_standby_points_length: i64,
    pub total_points_out_for_polling: i64,
    #[serde(default)]
    pub asap_priority_poll_queue_length: i64,
    #[serde(default)]
    pub high_priority_poll_queue_length: i64,
    #[serde(default)]
    pub normal_priority_poll_queue_length: i64,
    #[serde(default)]
    pub low_priority_poll_queue_length: i64,

    // Counters
    #[serde(default)]
    pub total_poll_count: i64,

    // Lockup alerts: poll time exceeded the class's max cycle time
    #[serde(default)]
    pub asap_priority_lockup_alert: bool,
    #[serde(default)]
    pub high_priority_lockup_alert: bool,
    #[serde(default)]
    pub normal_priority_lockup_alert: bool,
    #[serde(default)]
    pub low_priority_lockup_alert: bool,

    // Timing
    #[serde(default)]
    pub average_poll_execute_time: Option<String>,
    #[serde(default)]
    pub busy_time: Option<String>,
    #[serde(default)]
    pub enabled_time: Option<String>,

    /// Catch-all for fields this client does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
