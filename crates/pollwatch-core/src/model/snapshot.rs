// ── Configuration snapshot types ──

use serde::{Deserialize, Serialize};
use std::fmt;

// ── NetworkId ───────────────────────────────────────────────────────

/// Opaque network identifier as issued by the device-management API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(String);

impl NetworkId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NetworkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Tree ────────────────────────────────────────────────────────────

/// Leaf of the configuration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointConfig {
    pub enabled: bool,
}

/// A device and its points. A disabled device masks all of its points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub enabled: bool,
    pub points: Vec<PointConfig>,
}

/// A network and its devices, as fetched with devices and points attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub id: NetworkId,
    pub name: String,
    pub plugin_kind: String,
    pub enabled: bool,
    pub devices: Vec<DeviceConfig>,
}

/// A network as listed without its devices. Used for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub id: NetworkId,
    pub name: String,
    pub plugin_kind: String,
    pub enabled: bool,
}

/// Point-in-time copy of the configuration tree.
///
/// Immutable once built; a refresh replaces it wholesale. Networks outside
/// the monitored set are kept here and ignored when counting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    networks: Vec<NetworkConfig>,
}

impl Snapshot {
    pub fn new(networks: impl IntoIterator<Item = NetworkConfig>) -> Self {
        Self {
            networks: networks.into_iter().collect(),
        }
    }

    pub fn networks(&self) -> &[NetworkConfig] {
        &self.networks
    }
}

// ── Monitored set ───────────────────────────────────────────────────

/// A network whose polling stats are sampled every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredNetwork {
    pub id: NetworkId,
    pub name: String,
}

/// The networks fixed at startup for the lifetime of the process.
///
/// Keeps discovery order; membership is checked by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredNetworks {
    entries: Vec<MonitoredNetwork>,
}

impl MonitoredNetworks {
    /// Select the summaries served by `plugin`, regardless of their enable flag.
    pub fn from_summaries(summaries: impl IntoIterator<Item = NetworkSummary>, plugin: &str) -> Self {
        Self {
            entries: summaries
                .into_iter()
                .filter(|net| net.plugin_kind == plugin)
                .map(|net| MonitoredNetwork {
                    id: net.id,
                    name: net.name,
                })
                .collect(),
        }
    }

    pub fn contains(&self, id: &NetworkId) -> bool {
        self.entries.iter().any(|net| &net.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonitoredNetwork> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MonitoredNetworks {
    type Item = &'a MonitoredNetwork;
    type IntoIter = std::slice::Iter<'a, MonitoredNetwork>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
