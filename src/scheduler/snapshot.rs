//! Point-in-time views of an engine.

use serde::{Deserialize, Serialize};

use super::EventLog;
use crate::models::{Algorithm, Process, ProcessId, Tick};

/// An owned copy of engine state after some number of steps.
///
/// Every field is cloned out of the engine, so a snapshot can be kept,
/// mutated or serialized without any effect on the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotView {
    /// Current clock.
    pub time: Tick,
    /// Active discipline.
    pub algorithm: Algorithm,
    /// Round-Robin quantum (reported for every algorithm).
    pub quantum: Tick,
    /// Ready queue, head first.
    pub ready: Vec<Process>,
    /// Process holding the CPU.
    pub running: Option<Process>,
    /// Not yet arrived, in (arrival, id) order.
    pub incoming: Vec<Process>,
    /// Completed processes, in (arrival, id) order.
    pub finished: Vec<Process>,
    /// Every loaded process, in (arrival, id) order.
    pub all: Vec<Process>,
    /// Full event history.
    pub history: EventLog,
}

impl SnapshotView {
    /// Looks up a process by id.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.all.iter().find(|p| p.id == id)
    }

    /// Whether the CPU is idle in this view.
    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    /// Whether every loaded process has finished.
    pub fn is_complete(&self) -> bool {
        self.finished.len() == self.all.len()
    }
}
