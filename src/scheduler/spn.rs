//! Shortest-Process-Next scheduler.
//!
//! When the CPU is free, the waiting process with the smallest service
//! time is dispatched (ties broken by id) and runs to completion. Later,
//! shorter arrivals do not preempt it: this is static-priority SPN, not
//! shortest-remaining-time-next.

use super::{Run, Scheduler};
use crate::models::{ProcessDefinition, SimulationResult};

/// Non-preemptive shortest-job-first scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spn;

impl Scheduler for Spn {
    fn name(&self) -> String {
        "SPN".to_string()
    }

    fn simulate(&self, round: &[ProcessDefinition]) -> SimulationResult {
        let mut run = Run::new(round);
        let mut pool: Vec<usize> = Vec::new();
        let mut current: Option<usize> = None;

        while !run.is_finished() {
            run.admit(&mut pool);

            if current.is_none() {
                let shortest = pool
                    .iter()
                    .enumerate()
                    .min_by(|(_, &a), (_, &b)| {
                        let (a, b) = (run.state(a), run.state(b));
                        a.service().cmp(&b.service()).then_with(|| a.id().cmp(b.id()))
                    })
                    .map(|(pos, _)| pos);
                if let Some(pos) = shortest {
                    let idx = pool.swap_remove(pos);
                    log::trace!("SPN t={}: dispatch {}", run.now(), run.state(idx).id());
                    current = Some(idx);
                }
            }

            if run.execute(current) {
                current = None;
            }
        }

        run.finish()
    }
}
