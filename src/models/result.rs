//! Simulation result model.
//!
//! One `SimulationResult` is produced per (scheduler, round) pair and is
//! never modified afterwards.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround (T) | completion - arrival |
//! | Wait (E) | T - service |
//! | Penalty ratio (P) | T / service |
//!
//! # Reference
//! Finkel (1988), "An Operating Systems Vade Mecum", Ch. 2.2: Measures

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Ticks;

/// Symbol rendered for a tick in which the CPU was idle.
pub const IDLE_SYMBOL: char = '-';

/// Per-tick execution record.
///
/// Slot `i` holds the id of the process that ran during tick `i`,
/// or `None` when the CPU was idle. `Display` renders the concatenated
/// symbols, e.g. `"AA-BB"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    slots: Vec<Option<String>>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tick run by process `id`.
    pub fn push_run(&mut self, id: &str) {
        self.slots.push(Some(id.to_string()));
    }

    /// Appends an idle tick.
    pub fn push_idle(&mut self) {
        self.slots.push(None);
    }

    /// Number of recorded ticks.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no tick was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Per-tick slots in tick order.
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Id of the process running at `tick`, if any.
    pub fn at(&self, tick: usize) -> Option<&str> {
        self.slots.get(tick).and_then(|s| s.as_deref())
    }

    /// Number of idle ticks.
    pub fn idle_ticks(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Number of ticks process `id` ran.
    pub fn ticks_for(&self, id: &str) -> usize {
        self.slots
            .iter()
            .filter(|s| s.as_deref() == Some(id))
            .count()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match slot {
                Some(id) => f.write_str(id)?,
                None => write!(f, "{IDLE_SYMBOL}")?,
            }
        }
        Ok(())
    }
}

/// Per-process outcome of a finished simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process label.
    pub id: String,
    /// Arrival tick.
    pub arrival: Ticks,
    /// Required service.
    pub service: Ticks,
    /// Completion tick.
    pub completion: Ticks,
    /// Turnaround: completion - arrival.
    pub turnaround: Ticks,
    /// Wait: turnaround - service.
    pub wait: Ticks,
    /// Penalty ratio: turnaround / service (1.0 = optimal).
    pub penalty: f64,
}

/// Result of simulating one round under one scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Mean turnaround time (T̄).
    pub avg_turnaround: f64,
    /// Mean wait time (Ē).
    pub avg_wait: f64,
    /// Mean penalty ratio (P̄).
    pub avg_penalty: f64,
    /// Execution record, one slot per tick.
    pub timeline: Timeline,
    /// Per-process metrics in round order.
    pub processes: Vec<ProcessMetrics>,
}

impl SimulationResult {
    /// Total simulated ticks (length of the timeline).
    pub fn makespan(&self) -> usize {
        self.timeline.len()
    }

    /// Ticks the CPU spent idle.
    pub fn idle_ticks(&self) -> usize {
        self.timeline.idle_ticks()
    }

    /// Metrics for process `id`.
    pub fn process(&self, id: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.id == id)
    }
}
