// ── Live polling statistics ──
//
// Per-network counters are sampled fresh every cycle and never kept.
// `PollAggregate` folds them; the fold is commutative and associative so
// the order in which network samples arrive does not matter. Sums saturate
// at `u64::MAX`; the wire accepts any non-negative i64 per counter.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Priority class of the polling engine's queue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PollPriority {
    Asap,
    High,
    Normal,
    Low,
}

/// Which priority classes report a lockup (poll time over their max cycle time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockupAlerts {
    pub asap: bool,
    pub high: bool,
    pub normal: bool,
    pub low: bool,
}

impl LockupAlerts {
    pub fn contains(self, priority: PollPriority) -> bool {
        match priority {
            PollPriority::Asap => self.asap,
            PollPriority::High => self.high,
            PollPriority::Normal => self.normal,
            PollPriority::Low => self.low,
        }
    }

    pub fn any(self) -> bool {
        self.asap || self.high || self.normal || self.low
    }

    /// Stalled classes, highest priority first.
    pub fn active(self) -> impl Iterator<Item = PollPriority> {
        PollPriority::iter().filter(move |p| self.contains(*p))
    }
}

impl fmt::Display for LockupAlerts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for priority in self.active() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{priority}")?;
            first = false;
        }
        Ok(())
    }
}

/// Queue length per priority class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityQueueLengths {
    pub asap: u64,
    pub high: u64,
    pub normal: u64,
    pub low: u64,
}

/// One network's polling-engine counters for the current cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLiveStats {
    pub network: String,
    pub enabled: bool,
    pub queue_length: u64,
    pub standby_length: u64,
    pub in_flight_count: u64,
    pub lockups: LockupAlerts,

    pub priority_queue: PriorityQueueLengths,
    pub total_poll_count: u64,
    pub busy_time: Option<String>,
}

impl NetworkLiveStats {
    /// Points currently held by the polling engine, in any state.
    pub fn total(&self) -> u64 {
        self.queue_length
            .saturating_add(self.standby_length)
            .saturating_add(self.in_flight_count)
    }
}

/// Counters summed across the included networks of one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAggregate {
    pub queue_length: u64,
    pub standby_length: u64,
    pub in_flight_count: u64,
    pub lockouts: bool,
    /// Networks whose counters were included.
    pub sampled: usize,
    /// Networks sampled but excluded because their live flag is disabled.
    pub skipped: usize,
}

impl PollAggregate {
    /// Fold one network sample in. Disabled networks only bump `skipped`.
    pub fn absorb(self, stats: &NetworkLiveStats) -> Self {
        if !stats.enabled {
            return Self {
                skipped: self.skipped.saturating_add(1),
                ..self
            };
        }
        Self {
            queue_length: self.queue_length.saturating_add(stats.queue_length),
            standby_length: self.standby_length.saturating_add(stats.standby_length),
            in_flight_count: self.in_flight_count.saturating_add(stats.in_flight_count),
            lockouts: self.lockouts || stats.lockups.any(),
            sampled: self.sampled.saturating_add(1),
            skipped: self.skipped,
        }
    }

    pub fn total(&self) -> u64 {
        self.queue_length
            .saturating_add(self.standby_length)
            .saturating_add(self.in_flight_count)
    }
}
