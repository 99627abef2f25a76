//! Simulation engine, event history, snapshots and metrics.
//!
//! # Algorithm
//!
//! `Engine` is a single-CPU, discrete-time state machine. Each step admits
//! arrivals, dispatches if idle, applies the policy's preemption rule,
//! executes one tick and advances the clock.
//!
//! # KPI
//!
//! `ProcessMetrics` and `RunSummary` derive turnaround, waiting, response,
//! utilization and throughput from the records and the event log.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod engine;
mod history;
mod kpi;
mod snapshot;
mod table;

pub use engine::Engine;
pub use history::EventLog;
pub use kpi::{ProcessMetrics, RunSummary};
pub use snapshot::SnapshotView;
