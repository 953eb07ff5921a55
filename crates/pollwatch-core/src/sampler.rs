// ── Live-stats sampler ──
//
// Requests for every monitored network are issued concurrently and joined
// before folding. The first failed request aborts the whole batch.

use futures_util::future::try_join_all;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{MonitoredNetwork, MonitoredNetworks, NetworkLiveStats, PollAggregate};
use crate::source::PollingSource;

/// Sample one network's live counters.
pub async fn sample_network<S: PollingSource>(
    source: &S,
    plugin: &str,
    network: &MonitoredNetwork,
) -> Result<NetworkLiveStats, CoreError> {
    let stats = source.network_stats(plugin, &network.name).await?;
    log_sample(&stats);
    Ok(stats)
}

/// Sample every monitored network and fold the results.
///
/// Disabled networks are still sampled so re-enabling is noticed, but they
/// contribute nothing to the aggregate.
pub async fn sample_all<S: PollingSource>(
    source: &S,
    plugin: &str,
    networks: &MonitoredNetworks,
) -> Result<PollAggregate, CoreError> {
    let samples = try_join_all(
        networks
            .iter()
            .map(|network| sample_network(source, plugin, network)),
    )
    .await?;

    let aggregate = samples
        .iter()
        .fold(PollAggregate::default(), PollAggregate::absorb);
    debug!(
        sampled = aggregate.sampled,
        skipped = aggregate.skipped,
        total = aggregate.total(),
        "cycle sample complete"
    );
    Ok(aggregate)
}

fn log_sample(stats: &NetworkLiveStats) {
    if !stats.enabled {
        debug!(network = %stats.network, "network polling disabled; excluded this cycle");
        return;
    }

    debug!(
        network = %stats.network,
        queue = stats.queue_length,
        standby = stats.standby_length,
        in_flight = stats.in_flight_count,
        asap = stats.priority_queue.asap,
        high = stats.priority_queue.high,
        normal = stats.priority_queue.normal,
        low = stats.priority_queue.low,
        polls = stats.total_poll_count,
        busy = stats.busy_time.as_deref().unwrap_or("-"),
        "sampled polling stats"
    );

    if stats.lockups.any() {
        warn!(
            network = %stats.network,
            stalled = %stats.lockups,
            "polling lockup alert"
        );
    }
}
