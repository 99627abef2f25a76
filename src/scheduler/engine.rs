//! Tick-driven CPU scheduling engine.
//!
//! # Step Order
//!
//! Each call to [`Engine::step`] runs, in this order:
//!
//! 1. Admit arrivals (`arrival <= time`) from incoming into ready.
//! 2. Dispatch from ready if the CPU is idle.
//! 3. Preempt the running process if the policy prefers another (SRTF).
//! 4. Execute one tick, or record IDLE.
//! 5. Advance the clock.
//! 6. Admit arrivals again so the next tick's processes are already visible.
//!
//! Events produced while executing a tick that describe its *end* (FINISH and
//! the Round-Robin quantum PREEMPT) are stamped `time + 1`; all others are
//! stamped `time`. Metrics rely on `finish_time = time + 1`.
//!
//! # Ownership
//! Records live once in a [`ProcessTable`]; incoming, ready and the running
//! slot hold ids only.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, trace};

use super::table::ProcessTable;
use super::{EventLog, SnapshotView};
use crate::dispatching::{policy_for, SelectionPolicy};
use crate::error::SimError;
use crate::models::{Algorithm, Event, EventKind, Process, ProcessId, ProcessInput, Tick};
use crate::validation::{validate_batch, ValidationError, ValidationErrorKind};

/// Single-CPU scheduling simulator.
///
/// Deterministic: identical configuration and batch always yield an
/// identical history. The engine has no notion of wall-clock time and no
/// internal locking; `&mut self` on [`Engine::step`] and
/// [`Engine::load_processes`] serializes callers.
///
/// # Example
///
/// ```
/// use u_cpusched::models::{Algorithm, ProcessInput};
/// use u_cpusched::scheduler::Engine;
///
/// let mut engine = Engine::new(Algorithm::RoundRobin, Some(2)).unwrap();
/// engine
///     .load_processes(&[ProcessInput::new(5), ProcessInput::new(3)])
///     .unwrap();
///
/// while !engine.is_done() {
///     engine.step();
/// }
/// assert_eq!(engine.time(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    algorithm: Algorithm,
    policy: &'static dyn SelectionPolicy,
    quantum: Tick,
    time: Tick,
    table: ProcessTable,
    incoming: VecDeque<ProcessId>,
    ready: VecDeque<ProcessId>,
    running: Option<ProcessId>,
    /// `None` = unbounded (every algorithm except Round-Robin).
    quantum_left: Option<Tick>,
    history: EventLog,
    next_id: ProcessId,
}

impl Engine {
    /// Creates an engine with no processes loaded.
    ///
    /// `quantum` defaults to 1. Round-Robin rejects an explicit quantum of
    /// 0; other algorithms ignore the quantum and clamp it to 1.
    pub fn new(algorithm: Algorithm, quantum: Option<Tick>) -> Result<Self, SimError> {
        let quantum = match (algorithm, quantum) {
            (Algorithm::RoundRobin, Some(0)) => {
                return Err(SimError::InvalidConfiguration(
                    "Round-Robin quantum must be >= 1".into(),
                ))
            }
            (_, q) => q.unwrap_or(1).max(1),
        };

        Ok(Self {
            algorithm,
            policy: policy_for(algorithm),
            quantum,
            time: 0,
            table: ProcessTable::default(),
            incoming: VecDeque::new(),
            ready: VecDeque::new(),
            running: None,
            quantum_left: None,
            history: EventLog::new(),
            next_id: 1,
        })
    }

    /// Creates an engine from an algorithm name (`"FCFS"`, `"sjf"`, `"RR"`, ...).
    pub fn from_name(algorithm: &str, quantum: Option<Tick>) -> Result<Self, SimError> {
        Self::new(algorithm.parse()?, quantum)
    }

    /// Loads a batch and resets the run.
    ///
    /// Drafts without an id get the next free id from this engine's counter;
    /// ids are never reused across loads. Missing names default to `P{id}`.
    /// Records are ordered by (arrival, id).
    ///
    /// # Errors
    /// [`SimError::InvalidInput`] if any draft fails validation. The engine
    /// is left exactly as it was.
    pub fn load_processes(&mut self, inputs: &[ProcessInput]) -> Result<(), SimError> {
        validate_batch(inputs).map_err(SimError::InvalidInput)?;

        let reserved: HashSet<ProcessId> = inputs.iter().filter_map(|p| p.id).collect();
        let mut next_id = self.next_id;
        let mut records = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let id = match input.id {
                Some(id) => id,
                None => {
                    // Reserved ids are below MAX, so the skip cannot overflow.
                    while reserved.contains(&next_id) {
                        next_id += 1;
                    }
                    if next_id == ProcessId::MAX {
                        return Err(SimError::InvalidInput(vec![ValidationError::new(
                            ValidationErrorKind::InvalidId,
                            "no process ids left to assign on this engine",
                        )
                        .at(index)]));
                    }
                    next_id += 1;
                    next_id - 1
                }
            };
            let name = input.name.clone().unwrap_or_else(|| format!("P{id}"));
            // Validated non-negative / positive above.
            records.push(Process::new(id, name, input.arrival as Tick, input.burst as Tick));
        }
        records.sort_by(|a, b| a.arrival.cmp(&b.arrival).then_with(|| a.id.cmp(&b.id)));

        let max_reserved = reserved.iter().copied().max().unwrap_or(0);
        self.next_id = next_id.max(max_reserved + 1);

        self.incoming = records.iter().map(|p| p.id).collect();
        self.table = ProcessTable::new(records);
        self.ready.clear();
        self.running = None;
        self.quantum_left = None;
        self.time = 0;
        self.history = EventLog::new();

        info!(
            algorithm = %self.algorithm,
            quantum = self.quantum,
            processes = self.table.as_slice().len(),
            "loaded process batch"
        );
        Ok(())
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// Safe to call after completion: the CPU stays idle and the clock keeps
    /// advancing.
    pub fn step(&mut self) {
        self.admit_arrivals();
        self.dispatch_if_idle();
        self.preempt_if_required();
        self.execute_tick();
        self.time += 1;
        self.admit_arrivals();
    }

    /// Steps until [`Engine::is_done`], returning the number of steps taken.
    ///
    /// Never takes more than `sum(remaining) + max(arrival) - time` steps.
    pub fn run_until_done(&mut self) -> Tick {
        let horizon = self.table.horizon(self.time);
        let mut steps = 0;
        while !self.is_done() && steps < horizon {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Whether every loaded process has no remaining work.
    ///
    /// Vacuously true for an empty batch.
    pub fn is_done(&self) -> bool {
        self.table.iter().all(|p| p.remaining == 0)
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> SnapshotView {
        let resolve = |ids: &VecDeque<ProcessId>| -> Vec<Process> {
            ids.iter().map(|&id| self.table.record(id).clone()).collect()
        };

        SnapshotView {
            time: self.time,
            algorithm: self.algorithm,
            quantum: self.quantum,
            ready: resolve(&self.ready),
            running: self.running.map(|id| self.table.record(id).clone()),
            incoming: resolve(&self.incoming),
            finished: self
                .table
                .iter()
                .filter(|p| p.is_finished())
                .cloned()
                .collect(),
            all: self.table.as_slice().to_vec(),
            history: self.history.clone(),
        }
    }

    /// Current clock.
    pub fn time(&self) -> Tick {
        self.time
    }

    /// Active discipline.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Configured quantum.
    pub fn quantum(&self) -> Tick {
        self.quantum
    }

    /// Ticks left before a Round-Robin preemption. `None` = unbounded.
    pub fn quantum_left(&self) -> Option<Tick> {
        self.quantum_left
    }

    /// Process holding the CPU.
    pub fn running(&self) -> Option<&Process> {
        self.running.map(|id| self.table.record(id))
    }

    /// Looks up a loaded process.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.table.get(id)
    }

    /// Every loaded process in (arrival, id) order.
    pub fn processes(&self) -> &[Process] {
        self.table.as_slice()
    }

    /// Event history of the current run.
    pub fn history(&self) -> &EventLog {
        &self.history
    }

    fn admit_arrivals(&mut self) {
        while let Some(&id) = self.incoming.front() {
            if self.table.record(id).arrival > self.time {
                break;
            }
            self.incoming.pop_front();
            self.ready.push_back(id);
            trace!(time = self.time, pid = id, "admitted");
        }
    }

    fn select(&self, include_running: bool) -> Option<ProcessId> {
        let mut candidates: Vec<&Process> = self
            .ready
            .iter()
            .map(|&id| self.table.record(id))
            .collect();
        if include_running {
            if let Some(id) = self.running {
                candidates.push(self.table.record(id));
            }
        }
        self.policy.select(&candidates)
    }

    fn dispatch_if_idle(&mut self) {
        if self.running.is_some() {
            return;
        }
        if let Some(id) = self.select(false) {
            self.dispatch(id);
        }
    }

    fn dispatch(&mut self, id: ProcessId) {
        if let Some(pos) = self.ready.iter().position(|&r| r == id) {
            self.ready.remove(pos);
        }

        self.running = Some(id);
        self.quantum_left = self.algorithm.uses_quantum().then_some(self.quantum);

        let time = self.time;
        let record = self.table.record_mut(id);
        if !record.has_started() {
            record.start_time = Some(time);
        }
        if record.first_response_at.is_none() {
            record.first_response_at = Some(time);
        }
        record.last_dispatch_at = Some(time);

        self.history.push(Event::new(time, id, EventKind::Dispatch));
        debug!(time, pid = id, "dispatch");
    }

    fn preempt_if_required(&mut self) {
        if !self.policy.preempts_running() {
            return;
        }
        let Some(current) = self.running else {
            return;
        };
        let Some(best) = self.select(true) else {
            return;
        };
        if best == current {
            return;
        }

        self.running = None;
        self.ready.push_back(current);
        self.history
            .push(Event::new(self.time, current, EventKind::Preempt));
        debug!(time = self.time, pid = current, by = best, "preempt");
        self.dispatch(best);
    }

    fn execute_tick(&mut self) {
        let time = self.time;
        let Some(id) = self.running else {
            self.history.push(Event::idle(time));
            trace!(time, "idle");
            return;
        };

        let record = self.table.record_mut(id);
        record.remaining -= 1;
        let finished = record.remaining == 0;
        if finished {
            record.finish_time = Some(time + 1);
        }
        if let Some(left) = self.quantum_left.as_mut() {
            *left = left.saturating_sub(1);
        }
        self.history.push(Event::new(time, id, EventKind::Tick));
        trace!(time, pid = id, "tick");

        if finished {
            self.history.push(Event::new(time + 1, id, EventKind::Finish));
            self.running = None;
            self.quantum_left = Some(0);
            debug!(time = time + 1, pid = id, "finish");
            return;
        }

        if self.algorithm.uses_quantum() && self.quantum_left == Some(0) {
            self.running = None;
            self.ready.push_back(id);
            self.history.push(Event::new(time + 1, id, EventKind::Preempt));
            debug!(time = time + 1, pid = id, "quantum expired");
        }
    }
}
