//! Discrete-time CPU scheduling simulator.
//!
//! Evaluates and compares classic single-CPU scheduling disciplines against
//! synthetic workloads ("rounds") of processes described by arrival and
//! service time. Time advances in integer ticks; exactly one process runs
//! per tick.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessDefinition`, `ProcessState`,
//!   `Timeline`, `SimulationResult`, `ProcessMetrics`
//! - **`validation`**: Round and configuration checks (duplicate ids,
//!   non-positive service, malformed bounds)
//! - **`workload`**: Random round generator with uniform/exponential draws
//! - **`metrics`**: Arrival admission and turnaround/wait/penalty statistics
//! - **`scheduler`**: The `Scheduler` trait and its engines — FCFS, SPN,
//!   Round-Robin and Multi-Level Feedback Queue
//! - **`simulation`**: Driver running many rounds against many engines
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::models::ProcessDefinition;
//! use cpu_sched_sim::scheduler::{Fcfs, Scheduler};
//!
//! let round = vec![
//!     ProcessDefinition::new("A", 0, 3),
//!     ProcessDefinition::new("B", 1, 2),
//! ];
//! let result = Fcfs.simulate(&round);
//! assert_eq!(result.timeline.to_string(), "AAABB");
//! assert!((result.avg_turnaround - 3.5).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Finkel (1988), "An Operating Systems Vade Mecum", Ch. 2 (penalty ratio)
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8 (MLFQ)

pub mod metrics;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use models::{ProcessDefinition, ProcessState, SimulationResult, Ticks, Timeline};
pub use scheduler::{Fcfs, Mlfq, MlfqConfig, Quantum, RoundRobin, Scheduler, SchedulerConfig, Spn};
pub use simulation::{EngineReport, RoundReport, Simulation};
pub use validation::{ValidationError, ValidationErrorKind, ValidationResult};
pub use workload::{generate_round, Distribution, GeneratorConfig, NamingScheme};
