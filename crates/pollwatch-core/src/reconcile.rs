// ── Reconciliation engine ──
//
// Compares the aggregate of live polling counters against the expected
// point count, once per cycle. The engine never performs I/O: it tells the
// caller when a snapshot refresh is needed (`RefreshRequested`) and the
// caller feeds the recomputed count back through `apply_expected`.
//
// Debounce: the first mismatching cycle only forces a refresh, on the
// theory that the configuration changed. A mismatch is reported once the
// streak reaches `escalate_after`, and until the counts match again.

use std::num::NonZeroU64;

use serde::Serialize;
use strum::Display;

use crate::model::PollAggregate;

/// Fixed parameters of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// A scheduled refresh fires when `cycle_index % refresh_every == 0`.
    pub refresh_every: NonZeroU64,
    /// Streak length at which the report carries the incorrect count.
    pub escalate_after: u32,
}

// ── Signals ─────────────────────────────────────────────────────────

/// Why a snapshot refresh was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RefreshReason {
    /// Regular cadence.
    Scheduled,
    /// Out-of-schedule, triggered by a mismatching aggregate.
    Mismatch,
}

/// Command for the snapshot fetcher: fetch a new snapshot and hand the
/// recomputed count back through [`Reconciler::apply_expected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRequested {
    pub reason: RefreshReason,
}

/// Outcome of comparing one cycle's aggregate against the expected count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Synced,
    Mismatched {
        streak: u32,
        refresh: RefreshRequested,
    },
}

/// Observable state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReconcilePhase {
    Synced,
    Mismatched { streak: u32 },
}

// ── State ───────────────────────────────────────────────────────────

/// Process-wide reconciliation counters, mutated once per cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationState {
    expected_count: u64,
    last_mismatch: Option<u64>,
    consecutive_mismatches: u32,
    cycle_index: u64,
}

impl ReconciliationState {
    pub fn expected_count(&self) -> u64 {
        self.expected_count
    }

    /// Aggregate of the latest mismatching cycle, while a streak is active.
    pub fn last_mismatch(&self) -> Option<u64> {
        self.last_mismatch
    }

    pub fn consecutive_mismatches(&self) -> u32 {
        self.consecutive_mismatches
    }

    /// Number of cycles started so far.
    pub fn cycle_index(&self) -> u64 {
        self.cycle_index
    }

    pub fn phase(&self) -> ReconcilePhase {
        match self.consecutive_mismatches {
            0 => ReconcilePhase::Synced,
            streak => ReconcilePhase::Mismatched { streak },
        }
    }
}

/// What one cycle produced, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    pub lockouts: bool,
    pub expected: u64,
    pub total: u64,
    pub in_flight: u64,
    pub queue: u64,
    pub standby: u64,
    pub phase: ReconcilePhase,
    /// Set only once the mismatch streak has escalated.
    pub incorrect_count: Option<u64>,
}

// ── Engine ──────────────────────────────────────────────────────────

/// The reconciliation state machine: [`ReconciliationState`] plus policy.
#[derive(Debug, Clone)]
pub struct Reconciler {
    policy: ReconcilePolicy,
    state: ReconciliationState,
}

impl Reconciler {
    pub fn new(policy: ReconcilePolicy) -> Self {
        Self {
            policy,
            state: ReconciliationState::default(),
        }
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn state(&self) -> &ReconciliationState {
        &self.state
    }

    /// Start a cycle. Returns a scheduled refresh on every Nth cycle,
    /// including the very first. The index advances after the check.
    pub fn begin_cycle(&mut self) -> Option<RefreshRequested> {
        let due = self.state.cycle_index % self.policy.refresh_every.get() == 0;
        self.state.cycle_index += 1;
        due.then_some(RefreshRequested {
            reason: RefreshReason::Scheduled,
        })
    }

    /// Store a freshly computed expected count.
    ///
    /// A changed count is a legitimate configuration change, so any running
    /// mismatch streak is dropped. Returns whether the count changed.
    pub fn apply_expected(&mut self, count: u64) -> bool {
        if count == self.state.expected_count {
            return false;
        }
        self.state.expected_count = count;
        self.state.consecutive_mismatches = 0;
        self.state.last_mismatch = None;
        true
    }

    /// Compare this cycle's aggregate total against the expected count.
    pub fn observe(&mut self, total: u64) -> Verdict {
        if total == self.state.expected_count {
            self.state.consecutive_mismatches = 0;
            self.state.last_mismatch = None;
            return Verdict::Synced;
        }

        self.state.last_mismatch = Some(total);
        self.state.consecutive_mismatches = self.state.consecutive_mismatches.saturating_add(1);
        Verdict::Mismatched {
            streak: self.state.consecutive_mismatches,
            refresh: RefreshRequested {
                reason: RefreshReason::Mismatch,
            },
        }
    }

    /// Mismatching aggregate to report, once the streak has escalated.
    pub fn escalated(&self) -> Option<u64> {
        if self.state.consecutive_mismatches >= self.policy.escalate_after {
            self.state.last_mismatch
        } else {
            None
        }
    }

    /// Build the cycle report from the current state.
    pub fn report(&self, aggregate: &PollAggregate) -> CycleReport {
        CycleReport {
            cycle: self.state.cycle_index,
            lockouts: aggregate.lockouts,
            expected: self.state.expected_count,
            total: aggregate.total(),
            in_flight: aggregate.in_flight_count,
            queue: aggregate.queue_length,
            standby: aggregate.standby_length,
            phase: self.state.phase(),
            incorrect_count: self.escalated(),
        }
    }
}
