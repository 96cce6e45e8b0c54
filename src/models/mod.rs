//! Simulation domain models.
//!
//! Provides the data types shared by every scheduling engine: the
//! immutable process description, the per-run mutable process state, and
//! the result of one (scheduler, round) simulation.
//!
//! # Lifecycle
//!
//! | Type | Created by | Mutated |
//! |------|-----------|---------|
//! | `ProcessDefinition` | generator / external parser | never |
//! | `ProcessState` | each `simulate` call | tick by tick, privately |
//! | `SimulationResult` | metrics at end of run | never |

mod process;
mod result;

pub use process::{sort_round, total_service, ProcessDefinition, ProcessState};
pub use result::{ProcessMetrics, SimulationResult, Timeline, IDLE_SYMBOL};

/// Discrete simulated time unit. One tick = one unit of CPU work.
pub type Ticks = u64;
