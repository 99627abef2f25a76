//! Authoritative process store.
//!
//! The engine keeps every record of a run here exactly once. Queues and the
//! running slot hold only ids and resolve them through this table.

use std::collections::HashMap;

use crate::models::{Process, ProcessId, Tick};

#[derive(Debug, Clone, Default)]
pub(crate) struct ProcessTable {
    /// Records in (arrival, id) order.
    records: Vec<Process>,
    /// id → index into `records`.
    slots: HashMap<ProcessId, usize>,
}

impl ProcessTable {
    /// Builds a table from records already sorted by (arrival, id).
    pub(crate) fn new(records: Vec<Process>) -> Self {
        let slots = records
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id, slot))
            .collect();
        Self { records, slots }
    }

    pub(crate) fn get(&self, id: ProcessId) -> Option<&Process> {
        self.slots.get(&id).map(|&slot| &self.records[slot])
    }

    /// Resolves an id the engine placed in a queue.
    ///
    /// # Panics
    /// If `id` is not in the table; queues only ever hold loaded ids.
    pub(crate) fn record(&self, id: ProcessId) -> &Process {
        &self.records[self.slots[&id]]
    }

    /// Mutable counterpart of [`ProcessTable::record`].
    pub(crate) fn record_mut(&mut self, id: ProcessId) -> &mut Process {
        let slot = self.slots[&id];
        &mut self.records[slot]
    }

    pub(crate) fn as_slice(&self) -> &[Process] {
        &self.records
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Process> {
        self.records.iter()
    }

    /// Upper bound on the ticks needed to drain the table from `now`.
    ///
    /// Saturates at `Tick::MAX`.
    pub(crate) fn horizon(&self, now: Tick) -> Tick {
        let work = self
            .records
            .iter()
            .fold(0, |acc: Tick, p| acc.saturating_add(p.remaining));
        let last_arrival = self
            .records
            .iter()
            .filter(|p| p.remaining > 0)
            .map(|p| p.arrival)
            .max()
            .unwrap_or(0);
        work.saturating_add(last_arrival.saturating_sub(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProcessTable {
        ProcessTable::new(vec![
            Process::new(4, "P4", 0, 5),
            Process::new(2, "P2", 3, 2),
        ])
    }

    #[test]
    fn test_lookup_by_id() {
        let table = sample();
        assert_eq!(table.record(2).arrival, 3);
        assert_eq!(table.get(4).map(|p| p.burst), Some(5));
        assert!(table.get(1).is_none());
    }

    #[test]
    fn test_mutation_visible_through_lookup() {
        let mut table = sample();
        table.record_mut(4).remaining = 1;
        assert_eq!(table.get(4).map(|p| p.remaining), Some(1));
        assert_eq!(table.as_slice()[0].remaining, 1);
    }

    #[test]
    fn test_horizon() {
        let table = sample();
        assert_eq!(table.horizon(0), 7 + 3);
        assert_eq!(table.horizon(5), 7);
        assert_eq!(ProcessTable::default().horizon(0), 0);
    }

    #[test]
    fn test_horizon_saturates() {
        let huge = i64::MAX as Tick;
        let table = ProcessTable::new(vec![
            Process::new(1, "P1", 0, huge),
            Process::new(2, "P2", 0, huge),
            Process::new(3, "P3", huge, huge),
        ]);
        assert_eq!(table.horizon(0), Tick::MAX);

        let late = ProcessTable::new(vec![Process::new(1, "P1", Tick::MAX, Tick::MAX)]);
        assert_eq!(late.horizon(0), Tick::MAX);
        assert_eq!(late.horizon(Tick::MAX), Tick::MAX);
    }
}
