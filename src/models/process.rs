//! Process (job) model.
//!
//! A process is the unit of CPU work being scheduled. [`ProcessInput`] is the
//! draft submitted by the authoring surface; [`Process`] is the normalized
//! record owned by the engine once a batch is loaded.
//!
//! # Time Representation
//! All times are in discrete ticks relative to the start of a run (t=0).

use serde::{Deserialize, Serialize};

/// Discrete simulation time.
pub type Tick = u64;

/// Process identifier. Always positive once assigned.
pub type ProcessId = u64;

/// A process draft as submitted by a caller.
///
/// Arrival and burst are signed so that out-of-range values can be reported
/// by validation instead of being rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInput {
    /// Caller-supplied identifier. `None` = assigned by the engine.
    #[serde(default)]
    pub id: Option<ProcessId>,
    /// Display name. `None` = positional label (`P{id}`).
    #[serde(default)]
    pub name: Option<String>,
    /// Tick at which the process becomes eligible to run.
    #[serde(default)]
    pub arrival: i64,
    /// Total CPU ticks required.
    pub burst: i64,
}

impl ProcessInput {
    /// Creates a draft with the given burst, arriving at t=0.
    pub fn new(burst: i64) -> Self {
        Self {
            id: None,
            name: None,
            arrival: 0,
            burst,
        }
    }

    /// Sets the arrival tick.
    pub fn arriving_at(mut self, arrival: i64) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Pins the process identifier.
    pub fn with_id(mut self, id: ProcessId) -> Self {
        self.id = Some(id);
        self
    }
}

/// A process record owned by the engine.
///
/// Runtime fields (`remaining` and the timestamps) are only mutated by the
/// engine. Consumers see them through snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier, never reused within an engine.
    pub id: ProcessId,
    /// Display name.
    pub name: String,
    /// Arrival tick.
    pub arrival: Tick,
    /// Total CPU ticks required.
    pub burst: Tick,
    /// Ticks left to execute. `0 <= remaining <= burst`.
    pub remaining: Tick,
    /// First tick at which the process was dispatched.
    pub start_time: Option<Tick>,
    /// Tick boundary at which `remaining` reached zero.
    pub finish_time: Option<Tick>,
    /// First dispatch tick (equal to `start_time`).
    pub first_response_at: Option<Tick>,
    /// Most recent dispatch tick.
    pub last_dispatch_at: Option<Tick>,
}

impl Process {
    /// Creates a fresh record with `remaining = burst` and no timestamps.
    pub fn new(id: ProcessId, name: impl Into<String>, arrival: Tick, burst: Tick) -> Self {
        Self {
            id,
            name: name.into(),
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            finish_time: None,
            first_response_at: None,
            last_dispatch_at: None,
        }
    }

    /// Whether the process has completed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Whether the process has ever been dispatched.
    #[inline]
    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// CPU ticks consumed so far.
    #[inline]
    pub fn executed(&self) -> Tick {
        self.burst - self.remaining
    }
}
