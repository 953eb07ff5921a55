// Network configuration endpoints
//
// Both calls hit `GET /api/networks`; the query parameters decide how much
// of the network → device → point tree comes back.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Network;

impl ApiClient {
    /// List network summaries without devices.
    ///
    /// `GET /api/networks`
    pub async fn list_networks(&self) -> Result<Vec<Network>, Error> {
        let url = self.api_url(&["networks"])?;
        debug!("listing networks");
        self.get(url).await
    }

    /// Fetch the full configuration tree: networks with their devices and points.
    ///
    /// `GET /api/networks?with_devices=true&with_points=true`
    pub async fn network_tree(&self) -> Result<Vec<Network>, Error> {
        let mut url = self.api_url(&["networks"])?;
        url.query_pairs_mut()
            .append_pair("with_devices", "true")
            .append_pair("with_points", "true");
        debug!("fetching network tree");
        self.get(url).await
    }
}
