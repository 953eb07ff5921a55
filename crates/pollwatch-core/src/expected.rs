// ── Expected-count calculator ──

use crate::model::{MonitoredNetworks, Snapshot};

/// Number of points that should be under active polling.
///
/// A point counts when its network is monitored and enabled, its device is
/// enabled, and the point itself is enabled. A disabled ancestor masks the
/// whole subtree. Pure: the result depends only on the two inputs.
pub fn expected_count(snapshot: &Snapshot, monitored: &MonitoredNetworks) -> u64 {
    let points = snapshot
        .networks()
        .iter()
        .filter(|net| net.enabled && monitored.contains(&net.id))
        .flat_map(|net| &net.devices)
        .filter(|dev| dev.enabled)
        .flat_map(|dev| &dev.points)
        .filter(|point| point.enabled)
        .count();
    u64::try_from(points).unwrap_or(u64::MAX)
}
