// ── Data source seam ──
//
// The reconciliation loop only needs three reads. `PollingSource` names
// them so the monitor can run against the real API client or an
// in-memory fake.

use std::future::Future;

use pollwatch_api::ApiClient;

use crate::error::CoreError;
use crate::model::{NetworkConfig, NetworkLiveStats, NetworkSummary};

/// Read access to network configuration and live polling counters.
pub trait PollingSource {
    /// All networks, without devices.
    fn network_summaries(
        &self,
    ) -> impl Future<Output = Result<Vec<NetworkSummary>, CoreError>> + Send;

    /// All networks with devices and points attached.
    fn config_tree(&self) -> impl Future<Output = Result<Vec<NetworkConfig>, CoreError>> + Send;

    /// Live polling counters of one network, addressed by name.
    fn network_stats(
        &self,
        plugin: &str,
        network: &str,
    ) -> impl Future<Output = Result<NetworkLiveStats, CoreError>> + Send;
}

impl PollingSource for ApiClient {
    async fn network_summaries(&self) -> Result<Vec<NetworkSummary>, CoreError> {
        let networks = self.list_networks().await?;
        Ok(networks.into_iter().map(NetworkSummary::from).collect())
    }

    async fn config_tree(&self) -> Result<Vec<NetworkConfig>, CoreError> {
        let networks = self.network_tree().await?;
        Ok(networks.into_iter().map(NetworkConfig::from).collect())
    }

    async fn network_stats(
        &self,
        plugin: &str,
        network: &str,
    ) -> Result<NetworkLiveStats, CoreError> {
        let stats = self.network_poll_stats(plugin, network).await?;
        Ok(NetworkLiveStats {
            network: network.to_owned(),
            ..NetworkLiveStats::from(stats)
        })
    }
}
