//! Built-in selection policies.
//!
//! # Categories
//!
//! - **Positional**: FCFS, RR (head of the ready queue)
//! - **Ordering**: SJF, SRTF (minimum under a total order)
//!
//! # Tie-breaking
//! Ordering policies compare their primary key first, then earliest arrival,
//! then smallest id. Ids are unique, so the order is total and the selection
//! never depends on where a candidate sits in the slice.

use std::cmp::Ordering;

use super::SelectionPolicy;
use crate::models::{Process, ProcessId};

/// Orders by total burst, then arrival, then id.
pub fn shortest_job_order(a: &Process, b: &Process) -> Ordering {
    a.burst
        .cmp(&b.burst)
        .then_with(|| arrival_then_id(a, b))
}

/// Orders by remaining ticks, then arrival, then id.
pub fn shortest_remaining_order(a: &Process, b: &Process) -> Ordering {
    a.remaining
        .cmp(&b.remaining)
        .then_with(|| arrival_then_id(a, b))
}

fn arrival_then_id(a: &Process, b: &Process) -> Ordering {
    a.arrival.cmp(&b.arrival).then_with(|| a.id.cmp(&b.id))
}

fn min_by_order(
    candidates: &[&Process],
    order: fn(&Process, &Process) -> Ordering,
) -> Option<ProcessId> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| order(a, b))
        .map(|p| p.id)
}

// ======================== Positional policies ========================

/// First-Come-First-Served.
///
/// The ready queue is kept in arrival order, so the head is the earliest
/// arrival. Non-preemptive.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SelectionPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select(&self, candidates: &[&Process]) -> Option<ProcessId> {
        candidates.first().map(|p| p.id)
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}

/// Round-Robin.
///
/// Takes the head of the ready queue regardless of burst. The engine
/// enforces the quantum and re-enqueues at the tail.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin;

impl SelectionPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select(&self, candidates: &[&Process]) -> Option<ProcessId> {
        candidates.first().map(|p| p.id)
    }

    fn description(&self) -> &'static str {
        "Round-Robin"
    }
}

// ======================== Ordering policies ========================

/// Shortest-Job-First (non-preemptive).
///
/// Minimizes mean waiting time when all jobs are available at once.
///
/// # Reference
/// Smith (1956), optimal for mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SelectionPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select(&self, candidates: &[&Process]) -> Option<ProcessId> {
        min_by_order(candidates, shortest_job_order)
    }

    fn description(&self) -> &'static str {
        "Shortest-Job-First"
    }
}

/// Shortest-Remaining-Time-First (preemptive).
///
/// The running process is re-evaluated against the ready set every tick.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl SelectionPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn preempts_running(&self) -> bool {
        true
    }

    fn select(&self, candidates: &[&Process]) -> Option<ProcessId> {
        min_by_order(candidates, shortest_remaining_order)
    }

    fn description(&self) -> &'static str {
        "Shortest-Remaining-Time-First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{pick_next, policy_for};
    use crate::models::Algorithm;

    fn proc(id: ProcessId, arrival: u64, burst: u64, remaining: u64) -> Process {
        let mut p = Process::new(id, format!("P{id}"), arrival, burst);
        p.remaining = remaining;
        p
    }

    #[test]
    fn test_fcfs_takes_head() {
        let a = proc(3, 0, 9, 9);
        let b = proc(1, 2, 1, 1);
        assert_eq!(Fcfs.select(&[&a, &b]), Some(3));
    }

    #[test]
    fn test_rr_takes_head() {
        let a = proc(2, 4, 9, 9);
        let b = proc(1, 0, 1, 1);
        assert_eq!(RoundRobin.select(&[&a, &b]), Some(2));
    }

    #[test]
    fn test_sjf_shortest_burst() {
        let long = proc(1, 0, 8, 8);
        let short = proc(2, 3, 2, 2);
        let medium = proc(3, 1, 4, 4);
        assert_eq!(Sjf.select(&[&long, &short, &medium]), Some(2));
    }

    #[test]
    fn test_sjf_ignores_remaining() {
        let a = proc(1, 0, 5, 1);
        let b = proc(2, 0, 3, 3);
        assert_eq!(Sjf.select(&[&a, &b]), Some(2));
    }

    #[test]
    fn test_sjf_tie_breaks_by_arrival_then_id() {
        let later = proc(1, 4, 3, 3);
        let earlier = proc(5, 2, 3, 3);
        assert_eq!(Sjf.select(&[&later, &earlier]), Some(5));

        let high_id = proc(7, 2, 3, 3);
        let low_id = proc(6, 2, 3, 3);
        assert_eq!(Sjf.select(&[&high_id, &low_id]), Some(6));
        assert_eq!(Sjf.select(&[&low_id, &high_id]), Some(6));
    }

    #[test]
    fn test_srtf_uses_remaining() {
        let running = proc(1, 0, 5, 4);
        let arrived = proc(2, 1, 3, 3);
        assert_eq!(Srtf.select(&[&arrived, &running]), Some(2));
    }

    #[test]
    fn test_srtf_keeps_running_on_earlier_arrival_tie() {
        let running = proc(1, 0, 5, 3);
        let arrived = proc(2, 1, 3, 3);
        assert_eq!(Srtf.select(&[&arrived, &running]), Some(1));
    }

    #[test]
    fn test_srtf_full_tie_goes_to_lower_id() {
        let running = proc(2, 0, 5, 3);
        let waiting = proc(1, 0, 4, 3);
        assert_eq!(Srtf.select(&[&waiting, &running]), Some(1));
        assert_eq!(Srtf.select(&[&running, &waiting]), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        for algorithm in Algorithm::ALL {
            assert_eq!(pick_next(algorithm, &[]), None);
        }
    }

    #[test]
    fn test_policy_for_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(policy_for(algorithm).name(), algorithm.code());
        }
        assert!(policy_for(Algorithm::Srtf).preempts_running());
        assert!(!policy_for(Algorithm::RoundRobin).preempts_running());
        assert_eq!(
            policy_for(Algorithm::Sjf).description(),
            "Shortest-Job-First"
        );
    }

    #[test]
    fn test_orders_are_total() {
        let a = proc(1, 0, 3, 3);
        let b = proc(2, 0, 3, 3);
        assert_eq!(shortest_job_order(&a, &b), Ordering::Less);
        assert_eq!(shortest_remaining_order(&b, &a), Ordering::Greater);
        assert_eq!(shortest_job_order(&a, &a), Ordering::Equal);
    }
}
