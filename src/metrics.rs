//! Simulation metrics and shared admission logic.
//!
//! Computes per-process and aggregate performance figures from the
//! process states of a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | T̄ | Mean of completion - arrival |
//! | Ē | Mean of T - service |
//! | P̄ | Mean of T / service |
//!
//! # Reference
//! Finkel (1988), "An Operating Systems Vade Mecum", Ch. 2.2: Measures

use crate::models::{ProcessMetrics, ProcessState, SimulationResult, Ticks, Timeline};

/// Moves every process arriving at `now` into `queue`, in ascending id order.
///
/// Processes are referenced by their index into `states`.
/// Returns the number of admitted processes.
pub fn admit_arrivals<Q: Extend<usize>>(
    states: &[ProcessState],
    now: Ticks,
    queue: &mut Q,
) -> usize {
    let mut arrived: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, s)| s.arrival() == now)
        .map(|(idx, _)| idx)
        .collect();
    arrived.sort_by(|&a, &b| states[a].id().cmp(states[b].id()));
    let count = arrived.len();
    queue.extend(arrived);
    count
}

impl ProcessMetrics {
    /// Derives metrics from a finished process state.
    ///
    /// Returns `None` if the process has not completed.
    pub fn from_state(state: &ProcessState) -> Option<Self> {
        let completion = state.completion?;
        let turnaround = completion - state.arrival();
        Some(Self {
            id: state.id().to_string(),
            arrival: state.arrival(),
            service: state.service(),
            completion,
            turnaround,
            wait: turnaround - state.service(),
            penalty: turnaround as f64 / state.service() as f64,
        })
    }
}

/// Builds the result of a finished run.
///
/// Averages are arithmetic means over all processes; an empty round
/// yields zero averages.
///
/// # Panics
/// If any process has not completed. Calling this early is an engine bug.
pub fn summarize(states: &[ProcessState], timeline: Timeline) -> SimulationResult {
    let processes: Vec<ProcessMetrics> = states
        .iter()
        .map(|s| {
            ProcessMetrics::from_state(s).unwrap_or_else(|| {
                panic!(
                    "metrics requested before process '{}' completed ({} ticks remaining)",
                    s.id(),
                    s.remaining
                )
            })
        })
        .collect();

    let n = processes.len();
    let (avg_turnaround, avg_wait, avg_penalty) = if n == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let sum_t: f64 = processes.iter().map(|p| p.turnaround as f64).sum();
        let sum_e: f64 = processes.iter().map(|p| p.wait as f64).sum();
        let sum_p: f64 = processes.iter().map(|p| p.penalty).sum();
        (sum_t / n as f64, sum_e / n as f64, sum_p / n as f64)
    };

    SimulationResult {
        avg_turnaround,
        avg_wait,
        avg_penalty,
        timeline,
        processes,
    }
}
