#![allow(clippy::unwrap_used)]
// Reconciliation loop tests against a scripted in-memory data source.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use url::Url;

use pollwatch_core::{
    CoreError, CycleReport, DeviceConfig, LockupAlerts, Monitor, MonitorConfig, NetworkConfig,
    NetworkId, NetworkLiveStats, NetworkSummary, PointConfig, PollingSource, ReconcilePhase,
};

const PLUGIN: &str = "module-core-modbus";

// ── Scripted source ─────────────────────────────────────────────────

/// Hands out scripted values in order, repeating the last one forever.
struct Script<T: Clone> {
    queue: Mutex<VecDeque<T>>,
}

impl<T: Clone> Script<T> {
    fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            queue: Mutex::new(items.into_iter().collect()),
        }
    }

    fn next(&self) -> T {
        let mut queue = self.queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

/// Scripted stats reply: live counters, or a failing HTTP status.
type StatsReply = Result<NetworkLiveStats, u16>;

struct FakeSource {
    summaries: Vec<NetworkSummary>,
    trees: Script<Vec<NetworkConfig>>,
    stats: HashMap<String, Script<StatsReply>>,
    tree_calls: AtomicUsize,
    stats_calls: AtomicUsize,
}

impl FakeSource {
    fn new(summaries: Vec<NetworkSummary>, trees: Vec<Vec<NetworkConfig>>) -> Self {
        Self {
            summaries,
            trees: Script::new(trees),
            stats: HashMap::new(),
            tree_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
        }
    }

    fn with_stats(mut self, network: &str, replies: Vec<StatsReply>) -> Self {
        self.stats.insert(network.into(), Script::new(replies));
        self
    }
}

impl PollingSource for FakeSource {
    async fn network_summaries(&self) -> Result<Vec<NetworkSummary>, CoreError> {
        Ok(self.summaries.clone())
    }

    async fn config_tree(&self) -> Result<Vec<NetworkConfig>, CoreError> {
        self.tree_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.trees.next())
    }

    async fn network_stats(
        &self,
        plugin: &str,
        network: &str,
    ) -> Result<NetworkLiveStats, CoreError> {
        assert_eq!(plugin, PLUGIN);
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.stats.get(network).ok_or_else(|| CoreError::RequestFailed {
            status: 404,
            url: format!("/name/{network}"),
            body: "unknown network".into(),
        })?;
        script.next().map_err(|status| CoreError::RequestFailed {
            status,
            url: format!("/name/{network}"),
            body: "boom".into(),
        })
    }
}

// ── Builders ────────────────────────────────────────────────────────

fn summary(id: &str, plugin: &str) -> NetworkSummary {
    NetworkSummary {
        id: NetworkId::from(id),
        name: id.to_uppercase(),
        plugin_kind: plugin.into(),
        enabled: true,
    }
}

fn network(id: &str, enabled: bool, devices: Vec<DeviceConfig>) -> NetworkConfig {
    NetworkConfig {
        id: NetworkId::from(id),
        name: id.to_uppercase(),
        plugin_kind: PLUGIN.into(),
        enabled,
        devices,
    }
}

fn device(enabled: bool, points: &[bool]) -> DeviceConfig {
    DeviceConfig {
        enabled,
        points: points.iter().map(|&enabled| PointConfig { enabled }).collect(),
    }
}

fn live(queue: u64, standby: u64, out: u64) -> StatsReply {
    Ok(NetworkLiveStats {
        enabled: true,
        queue_length: queue,
        standby_length: standby,
        in_flight_count: out,
        ..NetworkLiveStats::default()
    })
}

fn disabled() -> StatsReply {
    Ok(NetworkLiveStats {
        enabled: false,
        queue_length: 50,
        ..NetworkLiveStats::default()
    })
}

fn config() -> MonitorConfig {
    let mut cfg = MonitorConfig::new(Url::parse("http://127.0.0.1:1660").unwrap());
    cfg.interval = Duration::from_secs(5);
    cfg
}

/// One modbus network "a" with two enabled points and one disabled point.
fn scenario_a_tree() -> Vec<NetworkConfig> {
    vec![network("a", true, vec![device(true, &[true, true, false])])]
}

async fn cycles(monitor: &mut Monitor<FakeSource>, n: usize) -> Vec<CycleReport> {
    let mut reports = Vec::with_capacity(n);
    for _ in 0..n {
        reports.push(monitor.run_cycle().await.unwrap());
    }
    reports
}

// ── Discovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn discovers_only_plugin_networks() {
    let source = FakeSource::new(
        vec![
            summary("a", PLUGIN),
            summary("b", "module-core-bacnet"),
            summary("c", PLUGIN),
        ],
        vec![Vec::new()],
    );

    let monitor = Monitor::start(source, config()).await.unwrap();

    let names: Vec<_> = monitor.networks().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn expected_count_from_snapshot() {
    let source = FakeSource::new(vec![summary("a", PLUGIN)], vec![scenario_a_tree()])
        .with_stats("A", vec![live(2, 0, 0)]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let report = monitor.run_cycle().await.unwrap();

    assert_eq!(report.expected, 2);
    assert_eq!(report.total, 2);
    assert_eq!(report.phase, ReconcilePhase::Synced);
    assert_eq!(report.incorrect_count, None);
}

#[tokio::test]
async fn transient_mismatch_is_never_reported() {
    let source = FakeSource::new(vec![summary("a", PLUGIN)], vec![scenario_a_tree()]).with_stats(
        "A",
        vec![live(1, 1, 0), live(2, 0, 0), live(3, 0, 0), live(2, 0, 0)],
    );
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let reports = cycles(&mut monitor, 5).await;

    assert!(reports.iter().all(|r| r.incorrect_count.is_none()));
    assert_eq!(reports[2].phase, ReconcilePhase::Mismatched { streak: 1 });
    assert_eq!(reports[3].phase, ReconcilePhase::Synced);
}

#[tokio::test]
async fn persistent_mismatch_is_reported_until_counts_match() {
    let source = FakeSource::new(vec![summary("a", PLUGIN)], vec![scenario_a_tree()]).with_stats(
        "A",
        vec![live(1, 0, 0), live(1, 0, 0), live(1, 0, 0), live(1, 1, 0)],
    );
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let reports = cycles(&mut monitor, 4).await;

    let incorrect: Vec<_> = reports.iter().map(|r| r.incorrect_count).collect();
    assert_eq!(incorrect, [None, Some(1), Some(1), None]);
    assert_eq!(monitor.state().consecutive_mismatches(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_stats_request_ends_the_run() {
    let source = FakeSource::new(
        vec![summary("a", PLUGIN), summary("b", PLUGIN)],
        vec![vec![
            network("a", true, vec![device(true, &[true])]),
            network("b", true, vec![device(true, &[true])]),
        ]],
    )
    .with_stats("A", vec![live(1, 0, 0)])
    .with_stats("B", vec![live(0, 1, 0), live(0, 1, 0), Err(503)]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let mut seen = Vec::new();
    let result = monitor
        .run(|report| {
            seen.push(report.clone());
            Ok::<_, CoreError>(())
        })
        .await;

    assert!(
        matches!(result, Err(CoreError::RequestFailed { status: 503, .. })),
        "expected RequestFailed, got: {result:?}"
    );
    assert_eq!(seen.len(), 2, "no report may be emitted for the failed cycle");
}

#[derive(Debug)]
enum SinkError {
    Core,
    Closed,
}

impl From<CoreError> for SinkError {
    fn from(_: CoreError) -> Self {
        Self::Core
    }
}

#[tokio::test(start_paused = true)]
async fn failing_report_sink_stops_polling() {
    let source = FakeSource::new(vec![summary("a", PLUGIN)], vec![scenario_a_tree()])
        .with_stats("A", vec![live(2, 0, 0)]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let mut delivered = 0;
    let result = monitor
        .run(|_| {
            delivered += 1;
            Err(SinkError::Closed)
        })
        .await;

    assert!(matches!(result, Err(SinkError::Closed)), "got: {result:?}");
    assert_eq!(delivered, 1);
    assert_eq!(monitor_stats_calls(&monitor), 1, "no cycle may follow a failed write");
}

// ── Refresh cadence ─────────────────────────────────────────────────

#[tokio::test]
async fn snapshot_refreshes_every_fifth_cycle_when_synced() {
    let source = FakeSource::new(vec![summary("a", PLUGIN)], vec![scenario_a_tree()])
        .with_stats("A", vec![live(2, 0, 0)]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    cycles(&mut monitor, 11).await;

    // Cycles 1, 6 and 11.
    assert_eq!(monitor_tree_calls(&monitor), 3);
}

#[tokio::test]
async fn mismatch_forces_an_extra_refresh() {
    let source = FakeSource::new(vec![summary("a", PLUGIN)], vec![scenario_a_tree()])
        .with_stats("A", vec![live(9, 0, 0), live(2, 0, 0), live(7, 0, 0)]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    cycles(&mut monitor, 3).await;

    // Cycle 1: scheduled + forced. Cycle 2: none. Cycle 3: forced.
    assert_eq!(monitor_tree_calls(&monitor), 3);
}

#[tokio::test]
async fn configuration_change_is_not_an_anomaly() {
    let grown = vec![network("a", true, vec![device(true, &[true, true, true])])];
    let source = FakeSource::new(
        vec![summary("a", PLUGIN)],
        vec![scenario_a_tree(), grown],
    )
    .with_stats("A", vec![live(2, 0, 0), live(3, 0, 0)]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let reports = cycles(&mut monitor, 3).await;

    assert_eq!(reports[0].expected, 2);
    assert_eq!(reports[1].expected, 3);
    assert_eq!(reports[1].phase, ReconcilePhase::Synced);
    assert!(reports.iter().all(|r| r.incorrect_count.is_none()));
}

// ── Sampling ────────────────────────────────────────────────────────

#[tokio::test]
async fn disabled_network_is_sampled_but_excluded() {
    let source = FakeSource::new(
        vec![summary("a", PLUGIN), summary("b", PLUGIN)],
        vec![vec![
            network("a", true, vec![device(true, &[true, true])]),
            network("b", false, vec![device(true, &[true])]),
        ]],
    )
    .with_stats("A", vec![live(1, 1, 0)])
    .with_stats("B", vec![disabled()]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let report = monitor.run_cycle().await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.expected, 2);
    assert_eq!(monitor_stats_calls(&monitor), 2);
}

#[tokio::test]
async fn lockouts_are_folded_across_networks() {
    let locked = Ok(NetworkLiveStats {
        enabled: true,
        queue_length: 1,
        lockups: LockupAlerts {
            normal: true,
            ..LockupAlerts::default()
        },
        ..NetworkLiveStats::default()
    });
    let source = FakeSource::new(
        vec![summary("a", PLUGIN), summary("b", PLUGIN)],
        vec![vec![
            network("a", true, vec![device(true, &[true])]),
            network("b", true, vec![device(true, &[true])]),
        ]],
    )
    .with_stats("A", vec![live(1, 0, 0)])
    .with_stats("B", vec![locked]);
    let mut monitor = Monitor::start(source, config()).await.unwrap();

    let report = monitor.run_cycle().await.unwrap();

    assert!(report.lockouts);
    assert_eq!(report.total, 2);
}

// ── Helpers over the monitor's source ───────────────────────────────

fn monitor_tree_calls(monitor: &Monitor<FakeSource>) -> usize {
    monitor.source().tree_calls.load(Ordering::SeqCst)
}

fn monitor_stats_calls(monitor: &Monitor<FakeSource>) -> usize {
    monitor.source().stats_calls.load(Ordering::SeqCst)
}
