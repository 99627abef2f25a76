//! Append-only event history.
//!
//! Events are kept in emission order. Several events may share a timestamp
//! (e.g. a FINISH followed by the next DISPATCH); their relative order is the
//! order the engine produced them and is never re-sorted by time.

use serde::{Deserialize, Serialize};

use crate::models::{Event, EventKind, ProcessId, Tick};

/// Ordered trace of a run.
///
/// Only the engine appends. Consumers read it through the accessors or by
/// iterating; displays that want a bounded window use [`EventLog::tail`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: Event) {
        debug_assert!(
            self.events.last().map_or(true, |last| last.time <= event.time),
            "event time went backwards: {event:?}"
        );
        self.events.push(event);
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in emission order.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Iterates in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// The last `n` events (or all of them if fewer).
    pub fn tail(&self, n: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }

    /// Events stamped with `time`, in emission order.
    pub fn at(&self, time: Tick) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.time == time)
    }

    /// Events involving `pid`, in emission order.
    pub fn for_process(&self, pid: ProcessId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.pid == Some(pid))
    }

    /// Number of events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventLog {
        let mut log = EventLog::new();
        log.push(Event::new(0, 1, EventKind::Dispatch));
        log.push(Event::new(0, 1, EventKind::Tick));
        log.push(Event::new(1, 1, EventKind::Finish));
        log.push(Event::new(1, 2, EventKind::Dispatch));
        log.push(Event::new(1, 2, EventKind::Tick));
        log
    }

    #[test]
    fn test_same_time_keeps_emission_order() {
        let log = sample();
        let kinds: Vec<_> = log.at(1).map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Finish, EventKind::Dispatch, EventKind::Tick]
        );
    }

    #[test]
    fn test_tail() {
        let log = sample();
        assert_eq!(log.tail(2).len(), 2);
        assert_eq!(log.tail(2)[0].kind, EventKind::Dispatch);
        assert_eq!(log.tail(100).len(), log.len());
        assert!(EventLog::new().tail(3).is_empty());
    }

    #[test]
    fn test_filters_and_counts() {
        let log = sample();
        assert_eq!(log.for_process(2).count(), 2);
        assert_eq!(log.count(EventKind::Dispatch), 2);
        assert_eq!(log.count(EventKind::Idle), 0);
        assert_eq!(log.last().map(|e| e.kind), Some(EventKind::Tick));
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(5));
    }
}
