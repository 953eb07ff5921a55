// ── Snapshot fetcher ──
//
// Discovery runs once at startup and fixes the monitored-network set.
// Snapshots are fetched on demand whenever the engine asks for a refresh.

use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{MonitoredNetworks, Snapshot};
use crate::source::PollingSource;

/// List networks and keep those served by `plugin`.
pub async fn discover<S: PollingSource>(
    source: &S,
    plugin: &str,
) -> Result<MonitoredNetworks, CoreError> {
    let summaries = source.network_summaries().await?;
    let total = summaries.len();
    let monitored = MonitoredNetworks::from_summaries(summaries, plugin);

    if monitored.is_empty() {
        warn!(plugin, total, "no networks found for plugin; counts will stay at zero");
    } else {
        info!(
            plugin,
            monitored = monitored.len(),
            total,
            "discovered networks to monitor"
        );
        for net in &monitored {
            debug!(id = %net.id, name = %net.name, "monitoring network");
        }
    }

    Ok(monitored)
}

/// Fetch the full configuration tree.
pub async fn fetch_snapshot<S: PollingSource>(source: &S) -> Result<Snapshot, CoreError> {
    let tree = source.config_tree().await?;
    let snapshot = Snapshot::new(tree);
    debug!(networks = snapshot.networks().len(), "fetched configuration snapshot");
    Ok(snapshot)
}
