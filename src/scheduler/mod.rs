//! Scheduling engines.
//!
//! Every engine implements [`Scheduler`]: given a validated round it
//! replays the whole workload tick by tick on a single CPU and returns a
//! [`SimulationResult`].
//!
//! # Tick loop
//!
//! All engines share the same skeleton, driven through `Run`:
//!
//! 1. Admit every process arriving at the current tick, in id order.
//! 2. Select (or keep) the running process per the engine's policy.
//! 3. Record the tick: the running id, or idle.
//! 4. Advance the clock; a process whose `remaining` hits 0 completes.
//! 5. Repeat until every process has completed.
//!
//! # Engines
//!
//! | Engine | Ready structure | Preemptive |
//! |--------|----------------|-----------|
//! | `Fcfs` | FIFO queue | no |
//! | `Spn` | pool, min service | no |
//! | `RoundRobin` | FIFO queue + quantum | on quantum expiry |
//! | `Mlfq` | one FIFO per level | quantum expiry, higher-level work |
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.3
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod config;
mod fcfs;
mod mlfq;
mod round_robin;
mod spn;

pub use config::SchedulerConfig;
pub use fcfs::Fcfs;
pub use mlfq::{Mlfq, MlfqConfig, Quantum};
pub use round_robin::RoundRobin;
pub use spn::Spn;

use std::fmt::Debug;

use crate::metrics;
use crate::models::{ProcessDefinition, ProcessState, SimulationResult, Ticks, Timeline};

/// A CPU scheduling discipline.
///
/// `simulate` must be a pure function of the round: running it twice on
/// the same input yields identical results. Each call owns its own
/// process states and queues, so engines can be shared across threads.
pub trait Scheduler: Send + Sync + Debug {
    /// Engine name including its parameters (e.g. `"RR2"`).
    fn name(&self) -> String;

    /// Simulates a validated round to completion.
    fn simulate(&self, round: &[ProcessDefinition]) -> SimulationResult;
}

/// Private state of one simulation run: process states, clock and timeline.
///
/// Processes are addressed by their index in the round.
#[derive(Debug)]
pub(crate) struct Run {
    states: Vec<ProcessState>,
    now: Ticks,
    timeline: Timeline,
    tick_limit: Ticks,
}

impl Run {
    pub(crate) fn new(round: &[ProcessDefinition]) -> Self {
        let states: Vec<ProcessState> = round.iter().map(ProcessState::new).collect();
        let last_arrival = round.iter().map(|d| d.arrival).max().unwrap_or(0);
        let total: Ticks = round.iter().map(|d| d.service).sum();
        Self {
            states,
            now: 0,
            timeline: Timeline::new(),
            tick_limit: last_arrival + total,
        }
    }

    /// Current tick.
    #[inline]
    pub(crate) fn now(&self) -> Ticks {
        self.now
    }

    pub(crate) fn state(&self, idx: usize) -> &ProcessState {
        &self.states[idx]
    }

    pub(crate) fn state_mut(&mut self, idx: usize) -> &mut ProcessState {
        &mut self.states[idx]
    }

    /// Admits the current tick's arrivals into `queue`.
    pub(crate) fn admit<Q: Extend<usize>>(&self, queue: &mut Q) -> usize {
        metrics::admit_arrivals(&self.states, self.now, queue)
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.states.iter().all(ProcessState::is_finished)
    }

    /// Executes one tick with `running` on the CPU (or idle).
    ///
    /// Returns `true` if the running process completed during this tick.
    ///
    /// # Panics
    /// If the loop runs past the last arrival plus total service, which
    /// only a broken engine can cause.
    pub(crate) fn execute(&mut self, running: Option<usize>) -> bool {
        assert!(
            self.now < self.tick_limit,
            "tick loop exceeded bound of {} ticks",
            self.tick_limit
        );
        let after = self.now + 1;
        let completed = match running {
            Some(idx) => {
                let state = &mut self.states[idx];
                self.timeline.push_run(&state.definition.id);
                state.run_tick(after)
            }
            None => {
                self.timeline.push_idle();
                false
            }
        };
        self.now = after;
        completed
    }

    /// Computes the final result.
    pub(crate) fn finish(self) -> SimulationResult {
        metrics::summarize(&self.states, self.timeline)
    }
}
