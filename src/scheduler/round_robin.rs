//! Round-Robin scheduler.
//!
//! Ready processes wait in a single FIFO queue. Each dispatch grants a
//! fixed quantum; a process that exhausts it without finishing goes back
//! to the tail of the queue.
//!
//! A process whose quantum expires at the end of tick `t` is re-enqueued
//! after the arrivals of tick `t + 1` have been admitted, so it never
//! jumps ahead of processes arriving at the moment it is descheduled.

use std::collections::VecDeque;

use super::{Run, Scheduler};
use crate::models::{ProcessDefinition, SimulationResult, Ticks};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Time-sliced FIFO scheduler.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    /// Creates a round-robin scheduler with the given quantum.
    ///
    /// # Errors
    /// `NonPositiveQuantum` if `quantum` is 0.
    pub fn new(quantum: Ticks) -> Result<Self, ValidationError> {
        if quantum == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                "Round-robin quantum must be at least one tick",
            ));
        }
        Ok(Self { quantum })
    }

    /// Configured quantum.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> String {
        format!("RR{}", self.quantum)
    }

    fn simulate(&self, round: &[ProcessDefinition]) -> SimulationResult {
        let mut run = Run::new(round);
        let mut ready: VecDeque<usize> = VecDeque::new();
        let mut current: Option<usize> = None;
        let mut expired: Option<usize> = None;
        let mut slice_left: Ticks = 0;

        while !run.is_finished() {
            run.admit(&mut ready);
            if let Some(idx) = expired.take() {
                ready.push_back(idx);
            }

            if current.is_none() {
                current = ready.pop_front();
                slice_left = self.quantum;
                if let Some(idx) = current {
                    log::trace!("RR t={}: dispatch {}", run.now(), run.state(idx).id());
                }
            }

            let completed = run.execute(current);
            if let Some(idx) = current {
                if completed {
                    current = None;
                } else {
                    slice_left -= 1;
                    if slice_left == 0 {
                        expired = Some(idx);
                        current = None;
                    }
                }
            }
        }

        run.finish()
    }
}
