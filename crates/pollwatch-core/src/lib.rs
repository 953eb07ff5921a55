//! Polling-count reconciliation between configured points and the live
//! polling engine.
//!
//! - **[`Monitor`]**: Discovers the monitored networks
//!   once, then every cycle samples live counters, reconciles them and
//!   yields a [`CycleReport`].
//!
//! - **[`Reconciler`]**: The debounce state machine over
//!   [`ReconciliationState`]. Pure; signals snapshot refreshes as
//!   [`RefreshRequested`] commands instead of fetching anything itself.
//!
//! - **[`expected_count`]**: Counts enabled points in a [`Snapshot`]
//!   under the monitored, enabled networks and enabled devices.
//!
//! - **[`PollingSource`]**: The read seam to the device-management API,
//!   implemented for [`pollwatch_api::ApiClient`].

pub mod config;
pub mod convert;
pub mod error;
pub mod expected;
pub mod fetcher;
pub mod model;
pub mod monitor;
pub mod reconcile;
pub mod sampler;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::MonitorConfig;
pub use error::CoreError;
pub use expected::expected_count;
pub use monitor::Monitor;
pub use reconcile::{
    CycleReport, ReconcilePhase, ReconcilePolicy, ReconciliationState, Reconciler, RefreshReason,
    RefreshRequested, Verdict,
};
pub use source::PollingSource;

pub use model::{
    DeviceConfig, LockupAlerts, MonitoredNetwork, MonitoredNetworks, NetworkConfig, NetworkId,
    NetworkLiveStats, NetworkSummary, PointConfig, PollAggregate, PollPriority, Snapshot,
};
