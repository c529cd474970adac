//! In-memory entry store with cell indices.
//!
//! The authoritative collection of schedule entries for one loaded
//! (department, semester). Entries live in an arena with stable positions
//! for the lifetime of one committed list; two derived indices are rebuilt
//! whenever the list changes:
//!
//! - `by_cell`: first entry per cell (drag targeting)
//! - `groups_by_cell`: every entry sharing a cell (rendering, grouping)
//!
//! The store exposes pure queries only. Mutation enters through the
//! session operations, which compute a full replacement list and swap it
//! in atomically via [`EntryStore::replace`] — a failed operation never
//! leaves the store half-updated.

use std::collections::HashMap;

use crate::models::{CellKey, ScheduleEntry, SessionType};

/// Entry arena plus derived per-cell indices.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<ScheduleEntry>,
    by_cell: HashMap<CellKey, usize>,
    groups_by_cell: HashMap<CellKey, Vec<usize>>,
}

impl EntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an initial entry list.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        let mut store = Self {
            entries,
            by_cell: HashMap::new(),
            groups_by_cell: HashMap::new(),
        };
        store.reindex();
        store
    }

    /// All entries, in arena order.
    #[inline]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry occupying a cell, if any.
    pub fn primary_at(&self, cell: CellKey) -> Option<&ScheduleEntry> {
        self.by_cell.get(&cell).map(|&idx| &self.entries[idx])
    }

    /// Every entry sharing a cell (parallel sections render together).
    pub fn group_at(&self, cell: CellKey) -> Vec<&ScheduleEntry> {
        self.groups_by_cell
            .get(&cell)
            .map(|indices| indices.iter().map(|&idx| &self.entries[idx]).collect())
            .unwrap_or_default()
    }

    /// Whether a cell has no occupants.
    #[inline]
    pub fn is_free(&self, cell: CellKey) -> bool {
        !self.groups_by_cell.contains_key(&cell)
    }

    /// The complete logical unit anchored at a cell, cloned and sorted by
    /// period.
    ///
    /// For a theory/mentor/elective cell this is the cell's group. For a
    /// lab cell it also pulls in the other half of the pair from the
    /// neighbouring period, so callers always displace, move, or swap whole
    /// units.
    pub fn logical_unit_at(&self, cell: CellKey) -> Vec<ScheduleEntry> {
        let Some(primary) = self.primary_at(cell) else {
            return Vec::new();
        };

        let mut unit: Vec<ScheduleEntry> =
            self.group_at(cell).into_iter().cloned().collect();

        if primary.session_type == SessionType::Lab {
            let code = primary.course_code.clone();
            for neighbour in [cell.period.checked_sub(1), cell.period.checked_add(1)]
                .into_iter()
                .flatten()
            {
                let other = CellKey::new(cell.day, neighbour);
                for entry in self.group_at(other) {
                    if entry.session_type == SessionType::Lab && entry.course_code == code {
                        unit.push(entry.clone());
                    }
                }
            }
        }

        unit.sort_by_key(|e| (e.period, e.section));
        unit
    }

    /// Deep snapshot of the current list, for history pushes.
    #[inline]
    pub fn snapshot(&self) -> Vec<ScheduleEntry> {
        self.entries.clone()
    }

    /// Atomically replaces the list and rebuilds the cell indices.
    pub fn replace(&mut self, entries: Vec<ScheduleEntry>) {
        self.entries = entries;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.by_cell.clear();
        self.groups_by_cell.clear();
        for (idx, entry) in self.entries.iter().enumerate() {
            let cell = entry.cell();
            self.by_cell.entry(cell).or_insert(idx);
            self.groups_by_cell.entry(cell).or_default().push(idx);
        }
    }
}
