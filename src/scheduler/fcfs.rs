//! First-Come-First-Served scheduler.
//!
//! Ready processes wait in a single FIFO queue. Once dispatched, a
//! process runs to completion.

use std::collections::VecDeque;

use super::{Run, Scheduler};
use crate::models::{ProcessDefinition, SimulationResult};

/// Non-preemptive FIFO scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn name(&self) -> String {
        "FCFS".to_string()
    }

    fn simulate(&self, round: &[ProcessDefinition]) -> SimulationResult {
        let mut run = Run::new(round);
        let mut ready: VecDeque<usize> = VecDeque::new();
        let mut current: Option<usize> = None;

        while !run.is_finished() {
            run.admit(&mut ready);

            if current.is_none() {
                current = ready.pop_front();
                if let Some(idx) = current {
                    log::trace!("FCFS t={}: dispatch {}", run.now(), run.state(idx).id());
                }
            }

            if run.execute(current) {
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

    #[test]
    fn test_fcfs_basic() {
        let r = round(&[("A", 0, 3), ("B", 1, 2)]);
        let result = simulate_checked(&Fcfs, &r);
        assert_eq!(result.timeline.to_string(), "AAABB");
        let a = result.process("A").unwrap();
        let b = result.process("B").unwrap();
        assert_eq!((a.turnaround, a.wait), (3, 0));
        assert_eq!((b.turnaround, b.wait), (4, 2));
        assert!((result.avg_turnaround - 3.5).abs() < 1e-10);
        assert!((result.avg_wait - 1.0).abs() < 1e-10);
        assert!((result.avg_penalty - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let r = round(&[("A", 0, 1), ("B", 3, 2)]);
        let result = simulate_checked(&Fcfs, &r);
        assert_eq!(result.timeline.to_string(), "A--BB");
        assert_eq!(result.idle_ticks(), 2);
        assert_eq!(result.makespan(), 5);
        assert!((result.avg_penalty - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_same_tick_arrivals_by_id() {
        // Round order deliberately not sorted by id.
        let r = round(&[("B", 0, 1), ("A", 0, 2)]);
        let result = simulate_checked(&Fcfs, &r);
        assert_eq!(result.timeline.to_string(), "AAB");
    }

    #[test]
    fn test_fcfs_classic_workload() {
        let r = round(&[("A", 0, 3), ("B", 1, 5), ("C", 3, 2), ("D", 9, 5), ("E", 12, 5)]);
        let result = simulate_checked(&Fcfs, &r);
        assert_eq!(result.timeline.to_string(), "AAABBBBBCCDDDDDEEEEE");
        // T = 3, 7, 7, 6, 8
        assert!((result.avg_turnaround - 6.2).abs() < 1e-10);
        assert!((result.avg_wait - 2.2).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_empty_round() {
        let result = Fcfs.simulate(&[]);
        assert!(result.timeline.is_empty());
        assert!((result.avg_turnaround - 0.0).abs() < 1e-10);
    }
}
