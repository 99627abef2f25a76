//! Tick-based CPU scheduling simulator.
//!
//! Simulates First-Come-First-Served, Shortest-Job-First,
//! Shortest-Remaining-Time-First and Round-Robin on a single CPU in
//! discrete time, producing a deterministic event trace and per-process
//! turnaround, waiting and response times.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Process`, `ProcessInput`, `Algorithm`, `Event`
//! - **`dispatching`**: Selection policies (FCFS, SJF, SRTF, RR)
//! - **`scheduler`**: `Engine`, `EventLog`, `SnapshotView`, `ProcessMetrics`, `RunSummary`
//! - **`validation`**: Batch checks (burst, arrival, ids)
//! - **`config`**: Scenario files and playback pacing
//! - **`playback`**: Start/stop control driven by an external tick signal
//! - **`workload`**: Seeded random batches
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::{Algorithm, ProcessInput};
//! use u_cpusched::scheduler::{Engine, RunSummary};
//!
//! let mut engine = Engine::new(Algorithm::Srtf, None).unwrap();
//! engine
//!     .load_processes(&[ProcessInput::new(5), ProcessInput::new(3).arriving_at(1)])
//!     .unwrap();
//! engine.run_until_done();
//!
//! let summary = RunSummary::from_snapshot(&engine.snapshot());
//! assert_eq!(summary.makespan, 8);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod playback;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::SimError;
