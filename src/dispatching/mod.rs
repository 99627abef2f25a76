//! Selection policies for the CPU slot.
//!
//! A policy maps a set of candidate processes to the one that should hold the
//! CPU next. Policies are pure: they never mutate their input and have no
//! notion of time beyond the fields of each record.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::pick_next;
//! use u_cpusched::models::{Algorithm, Process};
//!
//! let long = Process::new(1, "P1", 0, 5);
//! let short = Process::new(2, "P2", 1, 3);
//!
//! assert_eq!(pick_next(Algorithm::Fcfs, &[&long, &short]), Some(1));
//! assert_eq!(pick_next(Algorithm::Sjf, &[&long, &short]), Some(2));
//! assert_eq!(pick_next(Algorithm::Sjf, &[]), None);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod rules;

use crate::models::{Algorithm, Process, ProcessId};
use std::fmt::Debug;

/// A CPU selection policy.
///
/// # Candidate Order
/// Candidates are passed in ready-queue order (oldest enqueue first). For
/// preemption checks the running process is appended last. Positional
/// policies (FCFS, RR) rely on this order; ordering policies (SJF, SRTF)
/// ignore it.
pub trait SelectionPolicy: Send + Sync + Debug {
    /// Policy code (e.g., "FCFS", "SRTF").
    fn name(&self) -> &'static str;

    /// Whether the running process competes with the ready set every tick.
    fn preempts_running(&self) -> bool {
        false
    }

    /// Picks the next process, or `None` if there are no candidates.
    fn select(&self, candidates: &[&Process]) -> Option<ProcessId>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the policy implementing `algorithm`.
pub fn policy_for(algorithm: Algorithm) -> &'static dyn SelectionPolicy {
    match algorithm {
        Algorithm::Fcfs => &rules::Fcfs,
        Algorithm::Sjf => &rules::Sjf,
        Algorithm::Srtf => &rules::Srtf,
        Algorithm::RoundRobin => &rules::RoundRobin,
    }
}

/// Picks the next process under `algorithm`.
pub fn pick_next(algorithm: Algorithm, candidates: &[&Process]) -> Option<ProcessId> {
    policy_for(algorithm).select(candidates)
}
