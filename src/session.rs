//! Editing session façade.
//!
//! A [`SchedulerSession`] owns the grid model, entry store, undo history,
//! and swap controller for one (department, semester), and exposes the
//! editing operations as synchronous commands. The UI layer is a thin
//! consumer: it issues a command per gesture-end event and re-renders from
//! the read-only snapshots.
//!
//! # Mutation Discipline
//!
//! Every mutating command computes a full replacement list through the
//! engine, pushes a deep snapshot onto the history immediately before
//! committing, and swaps the new list in atomically. Refused commands
//! touch neither the store nor the history. Persistence happens only on
//! an explicit [`SchedulerSession::save`].

use tracing::{debug, info};

use crate::engine::collision::DroppedClass;
use crate::engine::placement::{self, PlacementOptions, PlacementOutcome, RefusalReason};
use crate::engine::swap::{SwapClick, SwapController, SwapState};
use crate::error::{EngineError, Result};
use crate::history::HistoryManager;
use crate::models::{
    CellKey, CourseDescriptor, DayOfWeek, GridModel, ScheduleEntry, SessionType,
};
use crate::services::{
    AvailabilityDirectory, CourseCatalog, ScheduleRepository, SnapshotExporter, TimeSlotSource,
};
use crate::store::EntryStore;

/// Result of a mutating edit command.
#[derive(Debug, Clone)]
pub enum EditOutcome {
    /// The command was applied; `dropped` lists units removed because no
    /// relocation slot existed.
    Applied {
        /// Soft warnings for dropped units (often empty).
        dropped: Vec<DroppedClass>,
    },
    /// The command was refused; no state change.
    Refused(RefusalReason),
}

impl EditOutcome {
    /// Whether the command mutated the schedule.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

/// Result of a cell click while swap mode is on.
#[derive(Debug, Clone)]
pub enum SwapOutcome {
    /// The cell became the swap source.
    Armed(CellKey),
    /// The selection was cleared.
    Disarmed,
    /// Nothing happened (empty cell, or swap mode off).
    Ignored,
    /// The swap was rejected with a user-facing message.
    Rejected {
        /// Rejection text for display.
        message: String,
    },
    /// The two cells exchanged occupants.
    Swapped,
}

/// Advisory availability for one cell, consumed by the manual editor.
#[derive(Debug, Clone, Default)]
pub struct CellAvailability {
    /// Faculty free at the cell.
    pub faculty: Vec<String>,
    /// Venues free at the cell.
    pub venues: Vec<String>,
}

/// Editing session for one (department, semester) schedule.
#[derive(Debug)]
pub struct SchedulerSession {
    department: String,
    semester: u8,
    grid: GridModel,
    store: EntryStore,
    history: HistoryManager,
    swap: SwapController,
}

impl SchedulerSession {
    /// Creates a session over a pre-derived grid and entry list.
    pub fn new(
        department: impl Into<String>,
        semester: u8,
        grid: GridModel,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        Self {
            department: department.into(),
            semester,
            grid,
            store: EntryStore::from_entries(entries),
            history: HistoryManager::new(),
            swap: SwapController::new(),
        }
    }

    /// Loads a session from the configuration and persistence
    /// collaborators.
    pub fn load(
        department: impl Into<String>,
        semester: u8,
        slots: &dyn TimeSlotSource,
        repository: &dyn ScheduleRepository,
    ) -> Result<Self> {
        let department = department.into();
        let slot_list = slots.list_time_slots().map_err(EngineError::Load)?;
        let grid = GridModel::derive(&slot_list);
        let entries = repository
            .list_schedule_entries(&department, semester)
            .map_err(EngineError::Load)?;
        info!(
            department,
            semester,
            entries = entries.len(),
            "loaded schedule"
        );
        Ok(Self::new(department, semester, grid, entries))
    }

    /// Department code this session edits.
    #[inline]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Semester this session edits.
    #[inline]
    pub fn semester(&self) -> u8 {
        self.semester
    }

    /// The derived grid, for rendering.
    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Current entries, for rendering and export.
    #[inline]
    pub fn entries(&self) -> &[ScheduleEntry] {
        self.store.entries()
    }

    /// First entry at a cell (drag targeting).
    pub fn primary_at(&self, cell: CellKey) -> Option<&ScheduleEntry> {
        self.store.primary_at(cell)
    }

    /// Every entry sharing a cell (parallel sections render together).
    pub fn group_at(&self, cell: CellKey) -> Vec<&ScheduleEntry> {
        self.store.group_at(cell)
    }

    /// Undo steps currently available.
    #[inline]
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Places a palette course at `(day, period)` with explicit attribute
    /// overrides.
    pub fn place(
        &mut self,
        course: &CourseDescriptor,
        day: DayOfWeek,
        period: u8,
        options: &PlacementOptions,
    ) -> EditOutcome {
        let outcome = placement::place(
            self.store.entries(),
            &self.grid,
            &self.department,
            self.semester,
            course,
            day,
            period,
            options,
        );
        self.commit(outcome)
    }

    /// Places a course by code, resolving default faculty/venue from the
    /// catalog.
    ///
    /// Fails with [`EngineError::UnknownCourse`] when the catalog does not
    /// list the code; a refused drop is still an `Ok` outcome.
    pub fn place_from_palette(
        &mut self,
        catalog: &dyn CourseCatalog,
        course_code: &str,
        day: DayOfWeek,
        period: u8,
    ) -> Result<EditOutcome> {
        let courses = catalog
            .list_courses(&self.department)
            .map_err(EngineError::Load)?;
        let course = courses
            .into_iter()
            .find(|c| c.code == course_code)
            .ok_or_else(|| EngineError::UnknownCourse(course_code.to_string()))?;

        let faculty = catalog
            .faculty_defaults(&self.department)
            .map_err(EngineError::Load)?
            .remove(course_code);
        let venue = catalog
            .venue_defaults(&self.department)
            .map_err(EngineError::Load)?
            .remove(course_code);

        Ok(self.place(&course, day, period, &PlacementOptions { faculty, venue }))
    }

    /// Moves the logical class occupying `origin` to `(day, period)`.
    pub fn move_entry(&mut self, origin: CellKey, day: DayOfWeek, period: u8) -> EditOutcome {
        let outcome = placement::move_class(self.store.entries(), &self.grid, origin, day, period);
        self.commit(outcome)
    }

    /// Whether swap mode is on.
    #[inline]
    pub fn swap_mode_enabled(&self) -> bool {
        self.swap.enabled()
    }

    /// Current swap selection.
    #[inline]
    pub fn swap_state(&self) -> SwapState {
        self.swap.state()
    }

    /// Toggles swap mode. Turning it off clears any armed selection.
    pub fn set_swap_mode(&mut self, enabled: bool) {
        self.swap.set_enabled(enabled);
    }

    /// Handles a cell click while swap mode is on.
    pub fn swap_click(&mut self, cell: CellKey) -> SwapOutcome {
        match self.swap.click(self.store.entries(), cell) {
            SwapClick::Armed(source) => SwapOutcome::Armed(source),
            SwapClick::Disarmed => SwapOutcome::Disarmed,
            SwapClick::Ignored => SwapOutcome::Ignored,
            SwapClick::TypeMismatch { message } => SwapOutcome::Rejected { message },
            SwapClick::Swapped { entries } => {
                self.history.push(self.store.snapshot());
                self.store.replace(entries);
                SwapOutcome::Swapped
            }
        }
    }

    /// Replaces the group at one cell (manual-entry modal).
    ///
    /// The group must be internally consistent: all entries one course and
    /// session kind, theory sections distinct, mentor/elective singleton,
    /// and no lab halves (labs are placed and moved as pairs). An empty
    /// group clears the cell. Entries are re-addressed to the edited cell
    /// and stamped with the session's department and semester.
    pub fn edit_cell(&mut self, cell: CellKey, group: Vec<ScheduleEntry>) -> EditOutcome {
        if !self.grid.is_valid_period(cell.period) {
            return EditOutcome::Refused(RefusalReason::InvalidPeriod);
        }
        if !group_is_consistent(&group) {
            return EditOutcome::Refused(RefusalReason::InvalidGroup);
        }

        // Removing the anchored unit (not just the cell) keeps a lab pair
        // from losing one half when its cell is overwritten.
        let existing = self.store.logical_unit_at(cell);
        let mut working: Vec<ScheduleEntry> = self
            .store
            .entries()
            .iter()
            .filter(|e| e.cell() != cell && !existing.contains(e))
            .cloned()
            .collect();
        for mut entry in group {
            entry.department = self.department.clone();
            entry.semester = self.semester;
            entry.day = cell.day;
            entry.period = cell.period;
            working.push(entry);
        }

        debug!(day = cell.day.label(), period = cell.period, "cell edited");
        self.history.push(self.store.snapshot());
        self.store.replace(working);
        EditOutcome::Applied { dropped: Vec::new() }
    }

    /// Deletes the logical unit anchored at a cell. Returns whether
    /// anything was removed.
    pub fn delete_at(&mut self, cell: CellKey) -> bool {
        let unit = self.store.logical_unit_at(cell);
        if unit.is_empty() {
            return false;
        }

        let working: Vec<ScheduleEntry> = self
            .store
            .entries()
            .iter()
            .filter(|e| !unit.contains(e))
            .cloned()
            .collect();

        debug!(
            course = %unit[0].course_code,
            day = cell.day.label(),
            period = cell.period,
            "deleted class"
        );
        self.history.push(self.store.snapshot());
        self.store.replace(working);
        true
    }

    /// Removes every entry from the grid.
    pub fn clear(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.history.push(self.store.snapshot());
        self.store.replace(Vec::new());
    }

    /// Restores the state before the last mutating command. Returns
    /// whether an undo step existed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.store.replace(snapshot);
                true
            }
            None => false,
        }
    }

    /// Persists the current entry list. Local state is unchanged either
    /// way; a failed save is retryable.
    pub fn save(&self, repository: &dyn ScheduleRepository) -> Result<()> {
        repository
            .save_schedule(&self.department, self.semester, self.store.entries())
            .map_err(EngineError::Save)?;
        info!(
            department = %self.department,
            semester = self.semester,
            entries = self.store.len(),
            "schedule saved"
        );
        Ok(())
    }

    /// Renders the current entry list through an export collaborator.
    pub fn export_with(&self, exporter: &dyn SnapshotExporter) -> Result<Vec<u8>> {
        exporter
            .export(self.store.entries())
            .map_err(EngineError::Export)
    }

    /// Advisory availability for one cell, for busy-flagging in the
    /// manual editor.
    pub fn availability(
        &self,
        directory: &dyn AvailabilityDirectory,
        day: DayOfWeek,
        period: u8,
    ) -> Result<CellAvailability> {
        let faculty = directory
            .available_faculty(&self.department, day, period)
            .map_err(EngineError::Load)?;
        let venues = directory
            .available_venues(&self.department, self.semester, day, period)
            .map_err(EngineError::Load)?;
        Ok(CellAvailability { faculty, venues })
    }

    /// Commits a placement outcome: history push, then atomic replace.
    fn commit(&mut self, outcome: PlacementOutcome) -> EditOutcome {
        match outcome {
            PlacementOutcome::Placed { entries, dropped } => {
                self.history.push(self.store.snapshot());
                self.store.replace(entries);
                EditOutcome::Applied { dropped }
            }
            PlacementOutcome::Refused(reason) => EditOutcome::Refused(reason),
        }
    }
}

/// Validates a manual cell group: one course and session kind throughout,
/// no lab halves, singleton mentor/elective, distinct theory sections.
fn group_is_consistent(group: &[ScheduleEntry]) -> bool {
    let Some(first) = group.first() else {
        return true; // empty group clears the cell
    };
    if !group
        .iter()
        .all(|e| e.course_code == first.course_code && e.session_type == first.session_type)
    {
        return false;
    }
    match first.session_type {
        SessionType::Lab => false,
        SessionType::Mentor | SessionType::OpenElective => group.len() == 1,
        SessionType::Theory => {
            if group.len() == 1 {
                return true;
            }
            let mut sections: Vec<Option<u8>> = group.iter().map(|e| e.section).collect();
            sections.sort_unstable();
            sections.windows(2).all(|w| w[0] != w[1]) && !sections.contains(&None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotKind, TimeSlotDefinition};
    use crate::services::{
        InMemoryAvailabilityDirectory, InMemoryCourseCatalog, InMemoryScheduleRepository,
        InMemoryTimeSlotSource, ServiceError,
    };

    const ACTIVE_DAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    /// Mon-Fri, periods 1-4 back to back (no breaks).
    fn plain_slots() -> Vec<TimeSlotDefinition> {
        let mut slots = Vec::new();
        for &day in &ACTIVE_DAYS {
            for p in 1..=4u8 {
                let start = 540 + (p as u16 - 1) * 60;
                slots.push(TimeSlotDefinition::regular(day, p, start, start + 60));
            }
        }
        slots
    }

    /// Mon-Fri, periods 1-4 with lunch between 2 and 3.
    fn lunch_slots() -> Vec<TimeSlotDefinition> {
        let mut slots = Vec::new();
        for &day in &ACTIVE_DAYS {
            slots.push(TimeSlotDefinition::regular(day, 1, 540, 600));
            slots.push(TimeSlotDefinition::regular(day, 2, 600, 660));
            slots.push(TimeSlotDefinition::non_regular(day, SlotKind::Lunch, 660, 720));
            slots.push(TimeSlotDefinition::regular(day, 3, 720, 780));
            slots.push(TimeSlotDefinition::regular(day, 4, 780, 840));
        }
        slots
    }

    fn session_with(slots: Vec<TimeSlotDefinition>) -> SchedulerSession {
        SchedulerSession::new("CSE", 4, GridModel::derive(&slots), Vec::new())
    }

    fn theory(code: &str) -> CourseDescriptor {
        CourseDescriptor::new(code, code, SessionType::Theory)
    }

    fn lab(code: &str) -> CourseDescriptor {
        CourseDescriptor::new(code, code, SessionType::Lab)
    }

    fn cells_of(session: &SchedulerSession, code: &str) -> Vec<(DayOfWeek, u8)> {
        let mut cells: Vec<(DayOfWeek, u8)> = session
            .entries()
            .iter()
            .filter(|e| e.course_code == code)
            .map(|e| (e.day, e.period))
            .collect();
        cells.sort();
        cells
    }

    struct FailingRepository;

    impl ScheduleRepository for FailingRepository {
        fn list_schedule_entries(
            &self,
            _department: &str,
            _semester: u8,
        ) -> std::result::Result<Vec<ScheduleEntry>, ServiceError> {
            Err(ServiceError::Unavailable("backend down".into()))
        }

        fn save_schedule(
            &self,
            _department: &str,
            _semester: u8,
            _entries: &[ScheduleEntry],
        ) -> std::result::Result<(), ServiceError> {
            Err(ServiceError::Persistence("write rejected".into()))
        }
    }

    struct PlainTextExporter;

    impl SnapshotExporter for PlainTextExporter {
        fn export(
            &self,
            entries: &[ScheduleEntry],
        ) -> std::result::Result<Vec<u8>, ServiceError> {
            let mut lines: Vec<String> = entries
                .iter()
                .map(|e| format!("{} {} P{}", e.course_code, e.day.label(), e.period))
                .collect();
            lines.sort();
            Ok(lines.join("\n").into_bytes())
        }
    }

    #[test]
    fn test_load_from_collaborators() {
        let slots = InMemoryTimeSlotSource::new(plain_slots());
        let repo = InMemoryScheduleRepository::new();
        repo.seed(
            "CSE",
            4,
            vec![ScheduleEntry::new(
                "CSE",
                4,
                &theory("MA101"),
                DayOfWeek::Monday,
                1,
            )],
        );

        let session = SchedulerSession::load("CSE", 4, &slots, &repo).unwrap();
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.grid().valid_periods().len(), 4);
        assert_eq!(session.grid().active_days().len(), 5);
    }

    #[test]
    fn test_load_failure_propagates() {
        let slots = InMemoryTimeSlotSource::new(plain_slots());
        let result = SchedulerSession::load("CSE", 4, &slots, &FailingRepository);
        assert!(matches!(result, Err(EngineError::Load(_))));
    }

    #[test]
    fn test_place_and_render_queries() {
        let mut session = session_with(plain_slots());
        let outcome = session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            2,
            &PlacementOptions::default(),
        );

        assert!(outcome.is_applied());
        let cell = CellKey::new(DayOfWeek::Monday, 2);
        assert_eq!(session.primary_at(cell).unwrap().course_code, "MA101");
        assert_eq!(session.group_at(cell).len(), 1);
    }

    #[test]
    fn test_refused_place_leaves_no_trace() {
        let mut session = session_with(lunch_slots());
        // Lab across lunch is refused.
        let outcome = session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            2,
            &PlacementOptions::default(),
        );

        assert!(matches!(
            outcome,
            EditOutcome::Refused(RefusalReason::BrokenContiguity)
        ));
        assert!(session.entries().is_empty());
        assert_eq!(session.history_depth(), 0);
    }

    #[test]
    fn test_lab_atomicity_after_edits() {
        // Lab entries always come in pairs at p and p+1, never a lone half.
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );
        session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );

        assert_eq!(
            cells_of(&session, "CS201"),
            vec![(DayOfWeek::Monday, 3), (DayOfWeek::Monday, 4)]
        );
        // Worked example: MA101 relocates left to period 2.
        assert_eq!(cells_of(&session, "MA101"), vec![(DayOfWeek::Monday, 2)]);
    }

    #[test]
    fn test_packed_flanks_drop_with_warning() {
        let mut session = session_with(plain_slots());
        for (code, period) in [("EE101", 1), ("PH101", 2), ("MA101", 3)] {
            session.place(
                &theory(code),
                DayOfWeek::Monday,
                period,
                &PlacementOptions::default(),
            );
        }

        let outcome = session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );

        let EditOutcome::Applied { dropped } = outcome else {
            panic!("Expected applied outcome");
        };
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].course_code, "MA101");
        assert!(cells_of(&session, "MA101").is_empty());
    }

    #[test]
    fn test_no_invalid_occupancy_invariant() {
        let mut session = session_with(lunch_slots());
        session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );

        for entry in session.entries() {
            assert!(session.grid().is_valid_period(entry.period));
        }
        // CS201 was displaced as a pair and stayed contiguous (1-2 is the
        // only other contiguous run).
        assert_eq!(
            cells_of(&session, "CS201"),
            vec![(DayOfWeek::Monday, 1), (DayOfWeek::Monday, 2)]
        );
    }

    #[test]
    fn test_move_between_days() {
        let mut session = session_with(plain_slots());
        session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );

        let outcome = session.move_entry(
            CellKey::new(DayOfWeek::Monday, 1),
            DayOfWeek::Wednesday,
            2,
        );

        assert!(outcome.is_applied());
        assert_eq!(
            cells_of(&session, "CS201"),
            vec![(DayOfWeek::Wednesday, 2), (DayOfWeek::Wednesday, 3)]
        );
    }

    #[test]
    fn test_swap_via_session() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );
        session.place(
            &theory("PH101"),
            DayOfWeek::Friday,
            4,
            &PlacementOptions::default(),
        );

        session.set_swap_mode(true);
        assert!(matches!(
            session.swap_click(CellKey::new(DayOfWeek::Monday, 1)),
            SwapOutcome::Armed(_)
        ));
        assert!(matches!(
            session.swap_click(CellKey::new(DayOfWeek::Friday, 4)),
            SwapOutcome::Swapped
        ));

        assert_eq!(cells_of(&session, "MA101"), vec![(DayOfWeek::Friday, 4)]);
        assert_eq!(cells_of(&session, "PH101"), vec![(DayOfWeek::Monday, 1)]);
        assert!(session.swap_mode_enabled());
        assert_eq!(session.swap_state(), SwapState::Idle);
    }

    #[test]
    fn test_swap_rejection_is_stateless() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );
        session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );
        let before: Vec<ScheduleEntry> = session.entries().to_vec();
        let history_before = session.history_depth();

        session.set_swap_mode(true);
        session.swap_click(CellKey::new(DayOfWeek::Monday, 1));
        let outcome = session.swap_click(CellKey::new(DayOfWeek::Monday, 3));

        assert!(matches!(outcome, SwapOutcome::Rejected { .. }));
        assert_eq!(session.entries(), before.as_slice());
        assert_eq!(session.history_depth(), history_before);
    }

    #[test]
    fn test_swap_survives_deletion_of_armed_cell() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );
        session.place(
            &theory("PH101"),
            DayOfWeek::Friday,
            4,
            &PlacementOptions::default(),
        );

        session.set_swap_mode(true);
        session.swap_click(CellKey::new(DayOfWeek::Monday, 1));
        // The armed cell is deleted out from under the selection.
        assert!(session.delete_at(CellKey::new(DayOfWeek::Monday, 1)));

        let outcome = session.swap_click(CellKey::new(DayOfWeek::Friday, 4));
        assert!(matches!(outcome, SwapOutcome::Disarmed));
        assert_eq!(session.swap_state(), SwapState::Idle);
        assert_eq!(cells_of(&session, "PH101"), vec![(DayOfWeek::Friday, 4)]);
    }

    #[test]
    fn test_undo_round_trip() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );
        let after_first: Vec<ScheduleEntry> = session.entries().to_vec();
        session.place(
            &theory("PH101"),
            DayOfWeek::Monday,
            2,
            &PlacementOptions::default(),
        );

        assert!(session.undo());
        assert_eq!(session.entries(), after_first.as_slice());
        assert!(session.undo());
        assert!(session.entries().is_empty());
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_spans_all_operation_kinds() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );
        session.move_entry(CellKey::new(DayOfWeek::Monday, 1), DayOfWeek::Tuesday, 2);
        session.delete_at(CellKey::new(DayOfWeek::Tuesday, 2));
        session.clear(); // empty store: no-op, no history entry

        assert_eq!(session.history_depth(), 3);
        assert!(session.undo());
        assert_eq!(cells_of(&session, "MA101"), vec![(DayOfWeek::Tuesday, 2)]);
        assert!(session.undo());
        assert_eq!(cells_of(&session, "MA101"), vec![(DayOfWeek::Monday, 1)]);
        assert!(session.undo());
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_delete_removes_whole_lab() {
        let mut session = session_with(plain_slots());
        session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            2,
            &PlacementOptions::default(),
        );

        // Deleting by the second half removes the pair.
        assert!(session.delete_at(CellKey::new(DayOfWeek::Monday, 3)));
        assert!(session.entries().is_empty());
        assert!(!session.delete_at(CellKey::new(DayOfWeek::Monday, 3)));
    }

    #[test]
    fn test_clear_and_undo() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );
        session.clear();
        assert!(session.entries().is_empty());

        assert!(session.undo());
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_edit_cell_sets_section_group() {
        let mut session = session_with(plain_slots());
        let course = theory("MA101");
        let cell = CellKey::new(DayOfWeek::Monday, 2);

        let outcome = session.edit_cell(
            cell,
            vec![
                ScheduleEntry::new("CSE", 4, &course, cell.day, cell.period)
                    .with_section(1)
                    .with_faculty("Dr. Rao"),
                ScheduleEntry::new("CSE", 4, &course, cell.day, cell.period)
                    .with_section(2)
                    .with_faculty("Dr. Iyer"),
            ],
        );

        assert!(outcome.is_applied());
        assert_eq!(session.group_at(cell).len(), 2);
    }

    #[test]
    fn test_edit_cell_refuses_inconsistent_groups() {
        let mut session = session_with(plain_slots());
        let cell = CellKey::new(DayOfWeek::Monday, 2);

        // Duplicate section numbers.
        let duplicate = vec![
            ScheduleEntry::new("CSE", 4, &theory("MA101"), cell.day, cell.period).with_section(1),
            ScheduleEntry::new("CSE", 4, &theory("MA101"), cell.day, cell.period).with_section(1),
        ];
        assert!(matches!(
            session.edit_cell(cell, duplicate),
            EditOutcome::Refused(RefusalReason::InvalidGroup)
        ));

        // Mentor cells are singleton.
        let mentor = CourseDescriptor::new("MEN01", "Mentoring", SessionType::Mentor);
        let doubled = vec![
            ScheduleEntry::new("CSE", 4, &mentor, cell.day, cell.period).with_section(1),
            ScheduleEntry::new("CSE", 4, &mentor, cell.day, cell.period).with_section(2),
        ];
        assert!(matches!(
            session.edit_cell(cell, doubled),
            EditOutcome::Refused(RefusalReason::InvalidGroup)
        ));

        // Lab halves cannot be hand-edited into a single cell.
        let half = vec![ScheduleEntry::new(
            "CSE",
            4,
            &lab("CS201"),
            cell.day,
            cell.period,
        )];
        assert!(matches!(
            session.edit_cell(cell, half),
            EditOutcome::Refused(RefusalReason::InvalidGroup)
        ));
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_edit_cell_over_lab_removes_whole_pair() {
        let mut session = session_with(plain_slots());
        session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            2,
            &PlacementOptions::default(),
        );

        let cell = CellKey::new(DayOfWeek::Monday, 2);
        let outcome = session.edit_cell(
            cell,
            vec![ScheduleEntry::new(
                "CSE",
                4,
                &theory("MA101"),
                cell.day,
                cell.period,
            )],
        );

        assert!(outcome.is_applied());
        // No lone lab half survives at period 3.
        assert!(cells_of(&session, "CS201").is_empty());
        assert_eq!(cells_of(&session, "MA101"), vec![(DayOfWeek::Monday, 2)]);
    }

    #[test]
    fn test_edit_cell_empty_group_clears_cell() {
        let mut session = session_with(plain_slots());
        let cell = CellKey::new(DayOfWeek::Monday, 2);
        session.place(&theory("MA101"), cell.day, cell.period, &PlacementOptions::default());

        let outcome = session.edit_cell(cell, Vec::new());
        assert!(outcome.is_applied());
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_place_from_palette_resolves_defaults() {
        let mut session = session_with(plain_slots());
        let catalog = InMemoryCourseCatalog::new()
            .with_course(theory("MA101"))
            .with_faculty_default("MA101", "Dr. Rao")
            .with_venue_default("MA101", "LH-1");

        let outcome = session
            .place_from_palette(&catalog, "MA101", DayOfWeek::Monday, 1)
            .unwrap();
        assert!(outcome.is_applied());

        let entry = session
            .primary_at(CellKey::new(DayOfWeek::Monday, 1))
            .unwrap();
        assert_eq!(entry.faculty.as_deref(), Some("Dr. Rao"));
        assert_eq!(entry.venue.as_deref(), Some("LH-1"));
    }

    #[test]
    fn test_place_from_palette_unknown_course() {
        let mut session = session_with(plain_slots());
        let catalog = InMemoryCourseCatalog::new();

        let result = session.place_from_palette(&catalog, "ZZ999", DayOfWeek::Monday, 1);
        assert!(matches!(result, Err(EngineError::UnknownCourse(_))));
        assert!(session.entries().is_empty());
    }

    #[test]
    fn test_save_round_trip_and_failure() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );

        let repo = InMemoryScheduleRepository::new();
        session.save(&repo).unwrap();
        assert_eq!(repo.list_schedule_entries("CSE", 4).unwrap().len(), 1);

        // A rejected save surfaces but leaves the session editable.
        let result = session.save(&FailingRepository);
        assert!(matches!(result, Err(EngineError::Save(_))));
        assert_eq!(session.entries().len(), 1);
        assert!(session
            .place(
                &theory("PH101"),
                DayOfWeek::Monday,
                2,
                &PlacementOptions::default(),
            )
            .is_applied());
    }

    #[test]
    fn test_export_with_collaborator() {
        let mut session = session_with(plain_slots());
        session.place(
            &theory("MA101"),
            DayOfWeek::Monday,
            1,
            &PlacementOptions::default(),
        );

        let document = session.export_with(&PlainTextExporter).unwrap();
        assert_eq!(String::from_utf8(document).unwrap(), "MA101 Mon P1");
    }

    #[test]
    fn test_availability_flags_for_manual_editor() {
        let session = session_with(plain_slots());
        let mut directory = InMemoryAvailabilityDirectory::new()
            .with_faculty("Dr. Rao")
            .with_faculty("Dr. Iyer")
            .with_venue("LH-1");
        directory.mark_faculty_busy("Dr. Rao", DayOfWeek::Monday, 2);

        let availability = session
            .availability(&directory, DayOfWeek::Monday, 2)
            .unwrap();
        assert_eq!(availability.faculty, vec!["Dr. Iyer".to_string()]);
        assert_eq!(availability.venues, vec!["LH-1".to_string()]);
    }

    #[test]
    fn test_collision_conservation_through_session() {
        let mut session = session_with(plain_slots());
        for (code, period) in [("EE101", 1), ("PH101", 2), ("MA101", 3), ("CH101", 4)] {
            session.place(
                &theory(code),
                DayOfWeek::Monday,
                period,
                &PlacementOptions::default(),
            );
        }

        let outcome = session.place(
            &lab("CS201"),
            DayOfWeek::Monday,
            3,
            &PlacementOptions::default(),
        );

        let EditOutcome::Applied { dropped } = outcome else {
            panic!("Expected applied outcome");
        };
        // Every displaced class is either still present exactly once or
        // reported as dropped.
        for code in ["MA101", "CH101"] {
            let present = cells_of(&session, code).len();
            let reported = dropped.iter().filter(|d| d.course_code == code).count();
            assert_eq!(present + reported, 1, "class {code} lost or duplicated");
        }
    }
}
