// ── Domain model ──
//
// Canonical types the reconciliation engine works on. The configuration
// side (snapshot) describes what *should* be polled; the stats side
// describes what the polling engine is actually holding.

pub mod snapshot;
pub mod stats;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use pollwatch_core::model::*` gives you everything.

pub use snapshot::{
    DeviceConfig, MonitoredNetwork, MonitoredNetworks, NetworkConfig, NetworkId, NetworkSummary,
    PointConfig, Snapshot,
};
pub use stats::{LockupAlerts, NetworkLiveStats, PollAggregate, PollPriority, PriorityQueueLengths};
