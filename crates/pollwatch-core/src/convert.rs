// ── API-to-domain type conversions ──
//
// Bridges raw `pollwatch_api` response types into `pollwatch_core::model`
// domain types. A missing or null enable flag converts to `false`, so an
// unknown state never makes a point count as expected. Negative counters
// clamp to zero.

use pollwatch_api::models::{Device, Network, PollQueueStatistics, Point};

use crate::model::{
    DeviceConfig, LockupAlerts, NetworkConfig, NetworkId, NetworkLiveStats, NetworkSummary,
    PointConfig, PriorityQueueLengths,
};

// ── Helpers ────────────────────────────────────────────────────────

fn counter(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}

// ── Configuration tree ─────────────────────────────────────────────

impl From<Point> for PointConfig {
    fn from(p: Point) -> Self {
        Self {
            enabled: p.enable.unwrap_or(false),
        }
    }
}

impl From<Device> for DeviceConfig {
    fn from(d: Device) -> Self {
        Self {
            enabled: d.enable.unwrap_or(false),
            points: d.points.into_iter().map(PointConfig::from).collect(),
        }
    }
}

impl From<Network> for NetworkConfig {
    fn from(n: Network) -> Self {
        Self {
            id: NetworkId::from(n.uuid),
            name: n.name,
            plugin_kind: n.plugin_name,
            enabled: n.enable.unwrap_or(false),
            devices: n.devices.into_iter().map(DeviceConfig::from).collect(),
        }
    }
}

impl From<Network> for NetworkSummary {
    fn from(n: Network) -> Self {
        Self {
            id: NetworkId::from(n.uuid),
            name: n.name,
            plugin_kind: n.plugin_name,
            enabled: n.enable.unwrap_or(false),
        }
    }
}

// ── Polling statistics ─────────────────────────────────────────────

impl From<PollQueueStatistics> for NetworkLiveStats {
    fn from(s: PollQueueStatistics) -> Self {
        Self {
            network: s.network_name.unwrap_or_default(),
            enabled: s.enable,
            queue_length: counter(s.total_poll_queue_length),
            standby_length: counter(s.total_standby_points_length),
            in_flight_count: counter(s.total_points_out_for_polling),
            lockups: LockupAlerts {
                asap: s.asap_priority_lockup_alert,
                high: s.high_priority_lockup_alert,
                normal: s.normal_priority_lockup_alert,
                low: s.low_priority_lockup_alert,
            },
            priority_queue: PriorityQueueLengths {
                asap: counter(s.asap_priority_poll_queue_length),
                high: counter(s.high_priority_poll_queue_length),
                normal: counter(s.normal_priority_poll_queue_length),
                low: counter(s.low_priority_poll_queue_length),
            },
            total_poll_count: counter(s.total_poll_count),
            busy_time: s.busy_time,
        }
    }
}
