//! CPU scheduling domain models.
//!
//! Provides the data types shared by the engine, the selection policies,
//! and external consumers of snapshots.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Operating system | Batch queue |
//! |------------|------------------|-------------|
//! | Process | Task/Thread | Job |
//! | Algorithm | Scheduler class | Queue discipline |
//! | Event | Context-switch trace | Job log entry |

mod algorithm;
mod event;
mod process;

pub use algorithm::Algorithm;
pub use event::{Event, EventKind};
pub use process::{Process, ProcessId, ProcessInput, Tick};
