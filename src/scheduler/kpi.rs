//! Per-process and per-run performance metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | Latest finish time |
//! | Utilization | busy ticks / (busy + idle ticks) |
//! | Throughput | finished processes / makespan |
//!
//! Metrics are derived on demand from process records and the event log;
//! nothing here is stored back into the engine.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::{EventLog, SnapshotView};
use crate::models::{EventKind, Process, ProcessId, Tick};

/// Timing metrics of one finished process, in ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process id.
    pub pid: ProcessId,
    /// Process name.
    pub name: String,
    /// finish - arrival.
    pub turnaround: i64,
    /// turnaround - burst.
    pub waiting: i64,
    /// first dispatch - arrival.
    pub response: i64,
}

impl ProcessMetrics {
    /// Computes metrics for a finished process; `None` if it has not finished.
    ///
    /// Response falls back to `finish - arrival` when no first dispatch was
    /// recorded.
    pub fn of(process: &Process) -> Option<Self> {
        let finish = process.finish_time? as i64;
        let arrival = process.arrival as i64;
        let turnaround = finish - arrival;
        let response = process
            .first_response_at
            .map(|t| t as i64 - arrival)
            .unwrap_or(turnaround);

        Some(Self {
            pid: process.id,
            name: process.name.clone(),
            turnaround,
            waiting: turnaround - process.burst as i64,
            response,
        })
    }
}

/// Aggregate indicators for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Metrics of each finished process, in (arrival, id) order.
    pub processes: Vec<ProcessMetrics>,
    /// Number of loaded processes.
    pub total: usize,
    /// Mean turnaround over finished processes.
    pub avg_turnaround: f64,
    /// Mean waiting over finished processes.
    pub avg_waiting: f64,
    /// Mean response over finished processes.
    pub avg_response: f64,
    /// Latest finish time (0 if nothing finished).
    pub makespan: Tick,
    /// Ticks in which a process executed.
    pub busy_ticks: usize,
    /// Ticks in which the CPU was idle.
    pub idle_ticks: usize,
    /// busy / (busy + idle), 0.0 before the first step.
    pub cpu_utilization: f64,
    /// DISPATCH events.
    pub context_switches: usize,
    /// PREEMPT events.
    pub preemptions: usize,
    /// Finished processes per tick of makespan.
    pub throughput: f64,
}

impl RunSummary {
    /// Computes the summary from process records and their history.
    pub fn calculate(processes: &[Process], history: &EventLog) -> Self {
        let metrics: Vec<ProcessMetrics> =
            processes.iter().filter_map(ProcessMetrics::of).collect();
        let finished = metrics.len();

        let mean = |f: fn(&ProcessMetrics) -> i64| -> f64 {
            if finished == 0 {
                0.0
            } else {
                metrics.iter().map(f).sum::<i64>() as f64 / finished as f64
            }
        };
        let avg_turnaround = mean(|m| m.turnaround);
        let avg_waiting = mean(|m| m.waiting);
        let avg_response = mean(|m| m.response);

        let makespan = processes
            .iter()
            .filter_map(|p| p.finish_time)
            .max()
            .unwrap_or(0);

        let busy_ticks = history.count(EventKind::Tick);
        let idle_ticks = history.count(EventKind::Idle);
        let cpu_utilization = if busy_ticks + idle_ticks == 0 {
            0.0
        } else {
            busy_ticks as f64 / (busy_ticks + idle_ticks) as f64
        };

        let throughput = if makespan == 0 {
            0.0
        } else {
            finished as f64 / makespan as f64
        };

        Self {
            processes: metrics,
            total: processes.len(),
            avg_turnaround,
            avg_waiting,
            avg_response,
            makespan,
            busy_ticks,
            idle_ticks,
            cpu_utilization,
            context_switches: history.count(EventKind::Dispatch),
            preemptions: history.count(EventKind::Preempt),
            throughput,
        }
    }

    /// Computes the summary from a snapshot.
    pub fn from_snapshot(snapshot: &SnapshotView) -> Self {
        Self::calculate(&snapshot.all, &snapshot.history)
    }

    /// Number of finished processes.
    pub fn finished(&self) -> usize {
        self.processes.len()
    }
}
