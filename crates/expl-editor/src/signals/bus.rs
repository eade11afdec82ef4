use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorSignal {
    RefreshGraph,
    RefreshStateEditor,
    GadgetsChangedOrInitialized,
    ExplorationPropertyChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub seq: u64,
    pub signal: EditorSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&SignalRecord)>;

/// Most recent emissions kept in `history`; older records are dropped.
pub const HISTORY_CAPACITY: usize = 256;

/// Synchronous broadcast of refresh signals. Observers run in registration
/// order before `emit` returns.
pub struct SignalBus {
    next_seq: u64,
    history: VecDeque<SignalRecord>,
    last_seq_by_signal: BTreeMap<EditorSignal, u64>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: usize,
}

impl SignalBus {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            history: VecDeque::new(),
            last_seq_by_signal: BTreeMap::new(),
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SignalRecord) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn emit(&mut self, signal: EditorSignal) -> SignalRecord {
        let record = SignalRecord {
            seq: self.next_seq,
            signal,
        };
        self.next_seq = self.next_seq.saturating_add(1);
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(record);
        self.last_seq_by_signal.insert(signal, record.seq);
        for (_, observer) in self.observers.iter_mut() {
            observer(&record);
        }
        record
    }

    pub fn history(&self) -> &VecDeque<SignalRecord> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Sequence number of the most recent emission of `signal`, if any.
    pub fn last_seq(&self, signal: EditorSignal) -> Option<u64> {
        self.last_seq_by_signal.get(&signal).copied()
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalBus")
            .field("next_seq", &self.next_seq)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "bus_test.rs"]
mod tests;
