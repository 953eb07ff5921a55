// Polling statistics endpoint
//
// Served by the protocol module, proxied under `/api/modules/{plugin}/`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::PollQueueStatistics;

impl ApiClient {
    /// Fetch the polling-queue statistics of one network, by network name.
    ///
    /// `GET /api/modules/{plugin}/api/polling/stats/network/name/{network_name}`
    pub async fn network_poll_stats(
        &self,
        plugin: &str,
        network_name: &str,
    ) -> Result<PollQueueStatistics, Error> {
        let url = self.api_url(&[
            "modules",
            plugin,
            "api",
            "polling",
            "stats",
            "network",
            "name",
            network_name,
        ])?;
        debug!(network = network_name, "fetching polling stats");
        self.get(url).await
    }
}
