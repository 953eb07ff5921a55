// ── Monitor ──
//
// Drives the reconciliation loop: discovery at startup, then one cycle per
// interval. Each cycle consumes the engine's refresh requests by fetching
// a new snapshot, samples every monitored network, and yields a report.
// Any request failure ends the run.

use std::time::Duration;

use tracing::{debug, info, warn};

use pollwatch_api::{ApiClient, TransportConfig};

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::expected::expected_count;
use crate::fetcher;
use crate::model::MonitoredNetworks;
use crate::reconcile::{CycleReport, ReconciliationState, Reconciler, RefreshRequested, Verdict};
use crate::sampler;
use crate::source::PollingSource;

/// The reconciliation loop bound to one data source.
pub struct Monitor<S> {
    source: S,
    config: MonitorConfig,
    networks: MonitoredNetworks,
    reconciler: Reconciler,
}

impl Monitor<ApiClient> {
    /// Build an HTTP client from the config and start monitoring through it.
    pub async fn connect(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = ApiClient::new(config.base_url.clone(), &transport)?;
        info!(url = %client.base_url(), "connecting to device-management API");
        Self::start(client, config).await
    }
}

impl<S: PollingSource> Monitor<S> {
    /// Discover the monitored networks. The set is fixed for the whole run.
    pub async fn start(source: S, config: MonitorConfig) -> Result<Self, CoreError> {
        let networks = fetcher::discover(&source, &config.plugin_name).await?;
        let reconciler = Reconciler::new(config.policy());
        Ok(Self {
            source,
            config,
            networks,
            reconciler,
        })
    }

    pub fn networks(&self) -> &MonitoredNetworks {
        &self.networks
    }

    pub fn state(&self) -> &ReconciliationState {
        self.reconciler.state()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one reconciliation cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CoreError> {
        if let Some(request) = self.reconciler.begin_cycle() {
            self.refresh(request).await?;
        }

        let aggregate =
            sampler::sample_all(&self.source, &self.config.plugin_name, &self.networks).await?;
        let total = aggregate.total();

        if let Verdict::Mismatched { streak, refresh } = self.reconciler.observe(total) {
            debug!(
                expected = self.reconciler.state().expected_count(),
                total, streak, "aggregate does not match expected count"
            );
            self.refresh(refresh).await?;
        }

        let report = self.reconciler.report(&aggregate);
        if let Some(incorrect) = report.incorrect_count {
            warn!(
                expected = report.expected,
                actual = incorrect,
                streak = self.reconciler.state().consecutive_mismatches(),
                "polling count mismatch persists"
            );
        }
        Ok(report)
    }

    /// Run cycles, handing each report to `on_report`.
    ///
    /// Ends at the first failed request or the first error from
    /// `on_report`, whichever comes first.
    pub async fn run<F, E>(&mut self, mut on_report: F) -> Result<(), E>
    where
        F: FnMut(&CycleReport) -> Result<(), E>,
        E: From<CoreError>,
    {
        loop {
            let report = self.run_cycle().await?;
            on_report(&report)?;
            sleep(self.config.interval).await;
        }
    }

    /// Fetch a fresh snapshot and feed the recomputed count to the engine.
    async fn refresh(&mut self, request: RefreshRequested) -> Result<(), CoreError> {
        let snapshot = fetcher::fetch_snapshot(&self.source).await?;
        let count = expected_count(&snapshot, &self.networks);
        let changed = self.reconciler.apply_expected(count);
        if changed {
            info!(reason = %request.reason, expected = count, "expected point count changed");
        } else {
            debug!(reason = %request.reason, expected = count, "snapshot refreshed");
        }
        Ok(())
    }
}

async fn sleep(interval: Duration) {
    if !interval.is_zero() {
        tokio::time::sleep(interval).await;
    }
}
