//! Declarative engine selection.

use serde::{Deserialize, Serialize};

use super::{Fcfs, Mlfq, MlfqConfig, RoundRobin, Scheduler, Spn};
use crate::models::Ticks;
use crate::validation::{ValidationError, ValidationErrorKind};

/// One entry of an engine selection.
///
/// A `RoundRobin` entry expands to one engine per quantum.
///
/// # Example
/// ```
/// use cpu_sched_sim::scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::RoundRobin { quanta: vec![1, 4] };
/// let engines = config.build().unwrap();
/// let names: Vec<String> = engines.iter().map(|e| e.name()).collect();
/// assert_eq!(names, vec!["RR1", "RR4"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum SchedulerConfig {
    /// First-come-first-served.
    Fcfs,
    /// Shortest-process-next.
    Spn,
    /// Round-robin, one engine per quantum.
    RoundRobin {
        /// Quanta, each strictly positive.
        quanta: Vec<Ticks>,
    },
    /// Multi-level feedback queue.
    Mlfq(MlfqConfig),
}

impl SchedulerConfig {
    /// Builds the configured engines.
    ///
    /// # Errors
    /// Any configuration error of the underlying engine, or
    /// `NonPositiveQuantum` for a round-robin entry without quanta.
    pub fn build(&self) -> Result<Vec<Box<dyn Scheduler>>, ValidationError> {
        match self {
            SchedulerConfig::Fcfs => Ok(vec![Box::new(Fcfs)]),
            SchedulerConfig::Spn => Ok(vec![Box::new(Spn)]),
            SchedulerConfig::RoundRobin { quanta } => {
                if quanta.is_empty() {
                    return Err(ValidationError::new(
                        ValidationErrorKind::NonPositiveQuantum,
                        "Round-robin requires at least one quantum",
                    ));
                }
                quanta
                    .iter()
                    .map(|&q| RoundRobin::new(q).map(|rr| Box::new(rr) as Box<dyn Scheduler>))
                    .collect()
            }
            SchedulerConfig::Mlfq(config) => Ok(vec![Box::new(Mlfq::new(config.clone())?)]),
        }
    }
}
