//! Trace events emitted by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ProcessId, Tick};

/// Kind of a trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// A process was installed on the CPU.
    Dispatch,
    /// The running process was taken off the CPU before finishing.
    Preempt,
    /// The running process executed one tick.
    Tick,
    /// The running process completed.
    Finish,
    /// No process was available for this tick.
    Idle,
}

impl EventKind {
    /// Upper-case code, as serialized (`"DISPATCH"`, `"IDLE"`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            EventKind::Dispatch => "DISPATCH",
            EventKind::Preempt => "PREEMPT",
            EventKind::Tick => "TICK",
            EventKind::Finish => "FINISH",
            EventKind::Idle => "IDLE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// A timestamped trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Tick the event is attributed to.
    pub time: Tick,
    /// Process involved. `None` only for [`EventKind::Idle`].
    pub pid: Option<ProcessId>,
    /// What happened.
    pub kind: EventKind,
}

impl Event {
    /// Creates an event for a process.
    pub fn new(time: Tick, pid: ProcessId, kind: EventKind) -> Self {
        Self {
            time,
            pid: Some(pid),
            kind,
        }
    }

    /// Creates an idle event.
    pub fn idle(time: Tick) -> Self {
        Self {
            time,
            pid: None,
            kind: EventKind::Idle,
        }
    }
}
