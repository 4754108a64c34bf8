//! Last reported state of every live stopwatch

use std::{collections::BTreeMap, time::Duration};

use super::{TimerId, TimerUpdate};

/// State of one stopwatch as last reported to the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub elapsed: Duration,
    pub running: bool,
}

/// One row of the display-facing view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub id: TimerId,
    pub elapsed: Duration,
    pub running: bool,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    snapshot: TimerSnapshot,
    generation: u64,
}

/// Ordered map from stopwatch id to its last snapshot.
///
/// Forced updates always land. Routine samples only refresh an entry that is
/// present, running, and on the same run as the sample, so a sample that
/// arrives after a stop, reset, or removal is dropped.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    entries: BTreeMap<TimerId, Entry>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update, returning whether it changed the store
    pub fn upsert(&mut self, update: &TimerUpdate) -> bool {
        let snapshot = TimerSnapshot {
            elapsed: update.elapsed,
            running: update.running,
        };

        if update.force_flush {
            self.entries.insert(
                update.id,
                Entry {
                    snapshot,
                    generation: update.generation,
                },
            );
            return true;
        }

        match self.entries.get_mut(&update.id) {
            Some(entry) if entry.snapshot.running && entry.generation == update.generation => {
                entry.snapshot = snapshot;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: TimerId) -> Option<TimerSnapshot> {
        self.entries.remove(&id).map(|entry| entry.snapshot)
    }

    pub fn get(&self, id: TimerId) -> Option<TimerSnapshot> {
        self.entries.get(&id).map(|entry| entry.snapshot)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in creation order
    pub fn views(&self) -> Vec<TimerView> {
        self.entries
            .iter()
            .map(|(&id, entry)| TimerView {
                id,
                elapsed: entry.snapshot.elapsed,
                running: entry.snapshot.running,
            })
            .collect()
    }
}
