//! Multi-Level Feedback Queue scheduler.
//!
//! # Algorithm
//!
//! Levels `0..L` each own a FIFO queue and a quantum; level 0 has the
//! highest priority. Per tick:
//!
//! 1. New arrivals enter level 0, in id order.
//! 2. Aging (threshold > 0): any process above level 0 that has been
//!    ready for at least `aging` ticks moves up one level and its wait
//!    counter resets.
//! 3. If the CPU is free, dispatch the head of the first non-empty level.
//! 4. Run one tick; every queued process waits one more tick.
//! 5. A finished process releases the CPU.
//! 6. With preemption on, work waiting at a strictly higher level sends
//!    the running process back to the tail of its own level (no demotion).
//! 7. An exhausted bounded quantum demotes the process one level
//!    (saturating at the lowest level).
//!
//! Queues live in an indexed arena (`level -> queue`) of process indices.
//!
//! # Reference
//! Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::{Run, Scheduler};
use crate::models::{ProcessDefinition, SimulationResult, Ticks};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Time slice granted at one MLFQ level.
///
/// Serialized as an integer: a negative value means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Quantum {
    /// At most this many consecutive ticks per dispatch.
    Bounded(Ticks),
    /// Runs until completion or preemption.
    Unbounded,
}

impl TryFrom<i64> for Quantum {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Err(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                "MLFQ quantum must be positive, or negative for unbounded",
            )),
            q if q < 0 => Ok(Quantum::Unbounded),
            q => Ok(Quantum::Bounded(q as Ticks)),
        }
    }
}

impl From<Quantum> for i64 {
    fn from(quantum: Quantum) -> Self {
        match quantum {
            Quantum::Bounded(q) => q as i64,
            Quantum::Unbounded => -1,
        }
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantum::Bounded(q) => write!(f, "{q}"),
            Quantum::Unbounded => f.write_str("∞"),
        }
    }
}

fn default_preempt() -> bool {
    true
}

/// MLFQ parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlfqConfig {
    /// Quantum per level, highest priority first.
    pub quanta: Vec<Quantum>,
    /// Ready ticks before promotion. 0 disables aging.
    #[serde(default)]
    pub aging: Ticks,
    /// Preempt the running process when a higher level has work.
    #[serde(default = "default_preempt")]
    pub preempt: bool,
}

impl MlfqConfig {
    /// Creates a configuration with preemption on and aging off.
    pub fn new(quanta: Vec<Quantum>) -> Self {
        Self {
            quanta,
            aging: 0,
            preempt: true,
        }
    }

    /// Sets the aging threshold.
    pub fn with_aging(mut self, aging: Ticks) -> Self {
        self.aging = aging;
        self
    }

    /// Enables or disables preemption on higher-level work.
    pub fn with_preemption(mut self, preempt: bool) -> Self {
        self.preempt = preempt;
        self
    }
}

/// Multi-level feedback queue scheduler.
#[derive(Debug, Clone)]
pub struct Mlfq {
    config: MlfqConfig,
}

/// The process currently holding the CPU.
#[derive(Debug, Clone, Copy)]
struct Slot {
    idx: usize,
    level: usize,
    /// Ticks left in the slice; `None` = unbounded.
    left: Option<Ticks>,
}

impl Mlfq {
    /// Creates an MLFQ scheduler.
    ///
    /// # Errors
    /// `EmptyLevels` if no level is configured, `NonPositiveQuantum` if a
    /// level has a bounded quantum of zero.
    pub fn new(config: MlfqConfig) -> Result<Self, ValidationError> {
        if config.quanta.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyLevels,
                "MLFQ requires at least one level",
            ));
        }
        if let Some(level) = config
            .quanta
            .iter()
            .position(|&q| q == Quantum::Bounded(0))
        {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("MLFQ level {level} has a zero quantum"),
            ));
        }
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &MlfqConfig {
        &self.config
    }

    fn age(&self, run: &mut Run, queues: &mut [VecDeque<usize>]) {
        for level in 1..queues.len() {
            let waiting = std::mem::take(&mut queues[level]);
            for idx in waiting {
                let state = run.state_mut(idx);
                if state.waited >= self.config.aging {
                    state.waited = 0;
                    log::trace!(
                        "MLFQ t={}: promote {} to level {}",
                        run.now(),
                        run.state(idx).id(),
                        level - 1
                    );
                    queues[level - 1].push_back(idx);
                } else {
                    queues[level].push_back(idx);
                }
            }
        }
    }

    fn dispatch(&self, run: &Run, queues: &mut [VecDeque<usize>]) -> Option<Slot> {
        let level = queues.iter().position(|q| !q.is_empty())?;
        let idx = queues[level].pop_front()?;
        let left = match self.config.quanta[level] {
            Quantum::Bounded(q) => Some(q),
            Quantum::Unbounded => None,
        };
        log::trace!(
            "MLFQ t={}: dispatch {} from level {}",
            run.now(),
            run.state(idx).id(),
            level
        );
        Some(Slot { idx, level, left })
    }
}

impl Scheduler for Mlfq {
    fn name(&self) -> String {
        let quanta: Vec<String> = self.config.quanta.iter().map(|q| q.to_string()).collect();
        format!(
            "MLFQ[q={};aging={};preempt={}]",
            quanta.join(","),
            self.config.aging,
            if self.config.preempt { "on" } else { "off" }
        )
    }

    fn simulate(&self, round: &[ProcessDefinition]) -> SimulationResult {
        let lowest = self.config.quanta.len() - 1;
        let mut run = Run::new(round);
        let mut queues: Vec<VecDeque<usize>> = vec![VecDeque::new(); lowest + 1];
        let mut current: Option<Slot> = None;

        while !run.is_finished() {
            run.admit(&mut queues[0]);

            if self.config.aging > 0 {
                self.age(&mut run, &mut queues);
            }

            if current.is_none() {
                current = self.dispatch(&run, &mut queues);
            }

            let completed = run.execute(current.map(|slot| slot.idx));
            if let Some(left) = current.as_mut().and_then(|slot| slot.left.as_mut()) {
                *left -= 1;
            }
            for queue in &queues {
                for &idx in queue {
                    run.state_mut(idx).waited += 1;
                }
            }

            let Some(slot) = current else {
                continue;
            };
            if completed {
                current = None;
            } else if self.config.preempt && queues[..slot.level].iter().any(|q| !q.is_empty()) {
                log::trace!(
                    "MLFQ t={}: preempt {} at level {}",
                    run.now(),
                    run.state(slot.idx).id(),
                    slot.level
                );
                run.state_mut(slot.idx).waited = 0;
                queues[slot.level].push_back(slot.idx);
                current = None;
            } else if slot.left == Some(0) {
                let dest = (slot.level + 1).min(lowest);
                log::trace!(
                    "MLFQ t={}: demote {} to level {}",
                    run.now(),
                    run.state(slot.idx).id(),
                    dest
                );
                run.state_mut(slot.idx).waited = 0;
                queues[dest].push_back(slot.idx);
                current = None;
            }
        }

        run.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_support::{round, simulate_checked};
    use crate::scheduler::{Fcfs, RoundRobin};

    fn mlfq(quanta: &[i64], aging: Ticks, preempt: bool) -> Mlfq {
        let quanta = quanta
            .iter()
            .map(|&q| Quantum::try_from(q).unwrap())
            .collect();
        Mlfq::new(
            MlfqConfig::new(quanta)
                .with_aging(aging)
                .with_preemption(preempt),
        )
        .unwrap()
    }

    #[test]
    fn test_quantum_from_raw() {
        assert_eq!(Quantum::try_from(3).unwrap(), Quantum::Bounded(3));
        assert_eq!(Quantum::try_from(-1).unwrap(), Quantum::Unbounded);
        assert_eq!(
            Quantum::try_from(0).unwrap_err().kind,
            ValidationErrorKind::NonPositiveQuantum
        );
    }

    #[test]
    fn test_empty_levels_rejected() {
        let err = Mlfq::new(MlfqConfig::new(Vec::new())).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyLevels);

        let config = MlfqConfig::new(vec![Quantum::Bounded(2), Quantum::Bounded(0)]);
        let err = Mlfq::new(config).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveQuantum);
    }

    #[test]
    fn test_mlfq_name() {
        assert_eq!(
            mlfq(&[1, 2, -1], 5, true).name(),
            "MLFQ[q=1,2,∞;aging=5;preempt=on]"
        );
        assert_eq!(mlfq(&[4], 0, false).name(), "MLFQ[q=4;aging=0;preempt=off]");
    }

    #[test]
    fn test_config_deserialize() {
        let config: MlfqConfig =
            serde_json::from_str(r#"{ "quanta": [1, 2, -1], "aging": 5 }"#).unwrap();
        assert_eq!(
            config.quanta,
            vec![Quantum::Bounded(1), Quantum::Bounded(2), Quantum::Unbounded]
        );
        assert_eq!(config.aging, 5);
        assert!(config.preempt);
        assert!(serde_json::from_str::<MlfqConfig>(r#"{ "quanta": [0] }"#).is_err());
        assert_eq!(serde_json::to_string(&config.quanta).unwrap(), "[1,2,-1]");
    }

    #[test]
    fn test_single_unbounded_level_is_fcfs() {
        let r = round(&[("A", 0, 3), ("B", 1, 5), ("C", 3, 2), ("D", 9, 5), ("E", 12, 5)]);
        let result = simulate_checked(&mlfq(&[-1], 0, true), &r);
        assert_eq!(result.timeline, simulate_checked(&Fcfs, &r).timeline);
    }

    #[test]
    fn test_single_bounded_level_slices() {
        let r = round(&[("A", 0, 3), ("B", 0, 3)]);
        let result = simulate_checked(&mlfq(&[2], 0, true), &r);
        let rr = RoundRobin::new(2).unwrap();
        assert_eq!(result.timeline.to_string(), "AABBAB");
        assert_eq!(result.timeline, rr.simulate(&r).timeline);
    }

    #[test]
    fn test_demotion() {
        let r = round(&[("A", 0, 3), ("B", 0, 3)]);
        let result = simulate_checked(&mlfq(&[1, 2], 0, false), &r);
        assert_eq!(result.timeline.to_string(), "ABAABB");
        assert_eq!(result.process("A").unwrap().turnaround, 4);
        assert_eq!(result.process("B").unwrap().turnaround, 6);
    }

    #[test]
    fn test_preemption_on_higher_level_work() {
        let r = round(&[("A", 0, 5), ("B", 2, 1)]);
        let result = simulate_checked(&mlfq(&[1, -1], 0, true), &r);
        assert_eq!(result.timeline.to_string(), "AAABAA");
        assert_eq!(result.process("B").unwrap().wait, 1);
    }

    #[test]
    fn test_no_preemption_runs_unbounded_level_out() {
        let r = round(&[("A", 0, 5), ("B", 2, 1)]);
        let result = simulate_checked(&mlfq(&[1, -1], 0, false), &r);
        assert_eq!(result.timeline.to_string(), "AAAAAB");
    }

    #[test]
    fn test_aging_promotes_waiting_process() {
        let arrivals = [
            ("A", 0, 3),
            ("B", 1, 1),
            ("C", 2, 1),
            ("D", 3, 1),
            ("E", 4, 1),
            ("F", 5, 1),
        ];
        let r = round(&arrivals);
        // A waits 3 ticks at level 1 and is promoted at t=4, ahead of F.
        let aged = simulate_checked(&mlfq(&[1, 1], 3, false), &r);
        assert_eq!(aged.timeline.to_string(), "ABCDEAFA");
        let plain = simulate_checked(&mlfq(&[1, 1], 0, false), &r);
        assert_eq!(plain.timeline.to_string(), "ABCDEFAA");
    }

    #[test]
    fn test_promotion_restarts_wait_count() {
        let r = round(&[
            ("A", 0, 3),
            ("B", 2, 1),
            ("C", 3, 1),
            ("D", 4, 1),
            ("E", 5, 1),
            ("F", 6, 1),
        ]);
        // A sinks to level 2 by t=2, reaches level 1 at t=4 and needs two
        // more ready ticks there before reaching level 0 at t=6, behind F.
        let result = simulate_checked(&mlfq(&[1, 1, 1], 2, false), &r);
        assert_eq!(result.timeline.to_string(), "AABCDEFA");
        assert_eq!(result.process("A").unwrap().completion, 8);
    }

    #[test]
    fn test_preemption_restarts_wait_count() {
        let r = round(&[
            ("A", 0, 6),
            ("B", 1, 1),
            ("C", 2, 1),
            ("D", 4, 1),
            ("E", 5, 1),
            ("F", 6, 1),
            ("G", 7, 1),
            ("H", 8, 1),
        ]);
        // A waits 2 ticks at level 1, runs, and is preempted by D at t=4.
        // Its count starts over, so promotion waits until t=8.
        let result = simulate_checked(&mlfq(&[1, -1], 3, true), &r);
        assert_eq!(result.timeline.to_string(), "ABCAADEFGHAAA");
    }

    #[test]
    fn test_demotion_restarts_wait_count() {
        let r = round(&[
            ("A", 0, 1),
            ("B", 0, 3),
            ("C", 1, 1),
            ("D", 2, 1),
            ("E", 3, 1),
            ("F", 4, 1),
            ("G", 5, 1),
        ]);
        // B's tick of waiting at level 0 does not carry over to level 1.
        let result = simulate_checked(&mlfq(&[1, 1], 3, false), &r);
        assert_eq!(result.timeline.to_string(), "ABCDEFGBB");
    }

    #[test]
    fn test_idle_ticks_before_first_arrival() {
        let r = round(&[("A", 2, 2)]);
        let result = simulate_checked(&mlfq(&[1, 1], 1, true), &r);
        assert_eq!(result.timeline.to_string(), "--AA");
    }
}
