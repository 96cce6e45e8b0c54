//! Process model.
//!
//! A process definition describes a unit of CPU work by label, arrival
//! tick and required service. Engines never touch definitions directly;
//! they clone them into `ProcessState`s private to one simulation run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Ticks;

/// An immutable process description.
///
/// Many simulations may read the same definition; none of them mutate it.
/// Validity (non-empty unique id, positive service) is checked by
/// [`crate::validation::validate_round`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Process label, unique within a round.
    pub id: String,
    /// Tick at which the process becomes ready.
    pub arrival: Ticks,
    /// Total CPU ticks required.
    pub service: Ticks,
}

impl ProcessDefinition {
    /// Creates a new process definition.
    pub fn new(id: impl Into<String>, arrival: Ticks, service: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival,
            service,
        }
    }
}

impl fmt::Display for ProcessDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, t={}", self.id, self.arrival, self.service)
    }
}

/// Sum of service times across a round.
pub fn total_service(round: &[ProcessDefinition]) -> Ticks {
    round.iter().map(|d| d.service).sum()
}

/// Sorts a round by `(arrival, id)` ascending, the canonical round order.
pub fn sort_round(round: &mut [ProcessDefinition]) {
    round.sort_by(|a, b| a.arrival.cmp(&b.arrival).then_with(|| a.id.cmp(&b.id)));
}

/// Mutable per-run state of one process.
///
/// # Invariants
/// - `remaining` only decreases, one tick at a time, and never underflows.
/// - `completion` is set exactly once, to the tick right after the last
///   executed tick, when `remaining` reaches 0.
#[derive(Debug, Clone)]
pub struct ProcessState {
    /// The definition this state was cloned from.
    pub definition: ProcessDefinition,
    /// Ticks of service still owed.
    pub remaining: Ticks,
    /// Completion tick. `None` until the process finishes.
    pub completion: Option<Ticks>,
    /// Consecutive ticks spent ready without running (MLFQ aging).
    pub waited: Ticks,
}

impl ProcessState {
    /// Creates the initial state for a definition.
    pub fn new(definition: &ProcessDefinition) -> Self {
        Self {
            definition: definition.clone(),
            remaining: definition.service,
            completion: None,
            waited: 0,
        }
    }

    /// Process label.
    #[inline]
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Arrival tick.
    #[inline]
    pub fn arrival(&self) -> Ticks {
        self.definition.arrival
    }

    /// Required service.
    #[inline]
    pub fn service(&self) -> Ticks {
        self.definition.service
    }

    /// Whether all service has been delivered.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Runs the process for one tick ending at `now_after`.
    ///
    /// Returns `true` if this tick completed the process.
    ///
    /// # Panics
    /// If the process has already finished.
    pub fn run_tick(&mut self, now_after: Ticks) -> bool {
        assert!(
            self.remaining > 0,
            "process '{}' dispatched after completion",
            self.definition.id
        );
        self.remaining -= 1;
        if self.remaining == 0 && self.completion.is_none() {
            self.completion = Some(now_after);
            return true;
        }
        false
    }
}
