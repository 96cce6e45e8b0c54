//! Simulation driver.
//!
//! Runs one or more rounds against a fixed selection of engines and
//! collects the results, rounds in input order and engines in selection
//! order. Formatting the reports is left to the caller.
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::models::ProcessDefinition;
//! use cpu_sched_sim::scheduler::SchedulerConfig;
//! use cpu_sched_sim::Simulation;
//!
//! let sim = Simulation::from_configs(&[
//!     SchedulerConfig::Fcfs,
//!     SchedulerConfig::RoundRobin { quanta: vec![2] },
//! ])
//! .unwrap();
//! let rounds = vec![vec![
//!     ProcessDefinition::new("A", 0, 3),
//!     ProcessDefinition::new("B", 0, 3),
//! ]];
//! let reports = sim.run(&rounds).unwrap();
//! assert_eq!(reports[0].results[1].name, "RR2");
//! assert_eq!(reports[0].results[1].result.timeline.to_string(), "AABBAB");
//! ```

use rand::Rng;
use serde::Serialize;

use crate::models::{total_service, ProcessDefinition, SimulationResult, Ticks};
use crate::scheduler::{Scheduler, SchedulerConfig};
use crate::validation::{validate_round, ValidationError};
use crate::workload::{generate_round, GeneratorConfig};

/// Result of one engine on one round.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    /// Engine name, parameters included.
    pub name: String,
    /// Simulation outcome.
    pub result: SimulationResult,
}

/// All engine results for one round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    /// Zero-based round index.
    pub index: usize,
    /// The simulated workload.
    pub processes: Vec<ProcessDefinition>,
    /// Sum of service times in the round.
    pub total_service: Ticks,
    /// One entry per engine, in selection order.
    pub results: Vec<EngineReport>,
}

/// Runs rounds against a selection of engines.
#[derive(Debug)]
pub struct Simulation {
    schedulers: Vec<Box<dyn Scheduler>>,
}

impl Simulation {
    /// Creates a driver over the given engines.
    pub fn new(schedulers: Vec<Box<dyn Scheduler>>) -> Self {
        Self { schedulers }
    }

    /// Builds every configured engine.
    ///
    /// # Errors
    /// The first engine configuration error.
    pub fn from_configs(configs: &[SchedulerConfig]) -> Result<Self, ValidationError> {
        let mut schedulers = Vec::new();
        for config in configs {
            schedulers.extend(config.build()?);
        }
        Ok(Self::new(schedulers))
    }

    /// Engines in selection order.
    pub fn schedulers(&self) -> &[Box<dyn Scheduler>] {
        &self.schedulers
    }

    /// Engine names in selection order.
    pub fn names(&self) -> Vec<String> {
        self.schedulers.iter().map(|s| s.name()).collect()
    }

    /// Simulates every round under every engine.
    ///
    /// All rounds are validated before any tick executes.
    ///
    /// # Errors
    /// Every validation error across all rounds.
    pub fn run(
        &self,
        rounds: &[Vec<ProcessDefinition>],
    ) -> Result<Vec<RoundReport>, Vec<ValidationError>> {
        let errors: Vec<ValidationError> = rounds
            .iter()
            .enumerate()
            .filter_map(|(index, round)| validate_round(round).err().map(|e| (index, e)))
            .flat_map(|(index, errs)| {
                errs.into_iter().map(move |mut e| {
                    e.message = format!("round {}: {}", index + 1, e.message);
                    e
                })
            })
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let reports: Vec<RoundReport> = rounds
            .iter()
            .enumerate()
            .map(|(index, round)| self.run_round(index, round))
            .collect();

        log::info!(
            "simulated {} rounds with {} engines",
            reports.len(),
            self.schedulers.len()
        );
        Ok(reports)
    }

    /// Generates `count` rounds from `config` and simulates them.
    ///
    /// # Errors
    /// A generator configuration error.
    pub fn run_generated<R: Rng + ?Sized>(
        &self,
        config: &GeneratorConfig,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<RoundReport>, Vec<ValidationError>> {
        let rounds = (0..count)
            .map(|_| generate_round(config, &mut *rng))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| vec![e])?;
        self.run(&rounds)
    }

    fn run_round(&self, index: usize, round: &[ProcessDefinition]) -> RoundReport {
        log::debug!("round {}: {} processes", index + 1, round.len());
        let results = self
            .schedulers
            .iter()
            .map(|scheduler| {
                let name = scheduler.name();
                let result = scheduler.simulate(round);
                log::debug!(
                    "round {}: {} T={:.2} E={:.2} P={:.2}",
                    index + 1,
                    name,
                    result.avg_turnaround,
                    result.avg_wait,
                    result.avg_penalty
                );
                EngineReport { name, result }
            })
            .collect();

        RoundReport {
            index,
            processes: round.to_vec(),
            total_service: total_service(round),
            results,
        }
    }
}
