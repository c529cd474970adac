//! Bounded undo history.
//!
//! A stack of whole-entry-list snapshots, pushed immediately before every
//! mutating operation and capped at [`HISTORY_DEPTH`] (oldest dropped on
//! overflow). `undo` pops the most recent snapshot; repeated undo walks
//! backward through the capped history. No redo stack is kept.

use std::collections::VecDeque;

use crate::models::ScheduleEntry;

/// Maximum retained snapshots.
pub const HISTORY_DEPTH: usize = 20;

/// Bounded stack of entry-list snapshots.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    snapshots: VecDeque<Vec<ScheduleEntry>>,
}

impl HistoryManager {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of undo steps available.
    #[inline]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no undo step is available.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Pushes a snapshot, evicting the oldest past [`HISTORY_DEPTH`].
    pub fn push(&mut self, snapshot: Vec<ScheduleEntry>) {
        if self.snapshots.len() == HISTORY_DEPTH {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pops the most recent snapshot, if any.
    pub fn undo(&mut self) -> Option<Vec<ScheduleEntry>> {
        self.snapshots.pop_back()
    }

    /// Discards all snapshots (used when a new schedule is loaded).
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }
}
