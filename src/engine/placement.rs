//! Placement and move operations.
//!
//! Both operations are pure: they take the current entry list, validate
//! the destination, and return either a full replacement list (with any
//! drop warnings from collision resolution) or a refusal. The session
//! commits the replacement list atomically, so a refused or failed
//! operation never touches the store.
//!
//! # Refusals
//! An invalid target period or a broken lab span is a normal
//! "drop refused" outcome, not an error: no entry is created, no state
//! changes, nothing is surfaced beyond the refusal reason.

use tracing::debug;

use crate::engine::collision::{collect_unit, insert_with_resolution, DroppedClass};
use crate::models::{
    CellKey, CourseDescriptor, DayOfWeek, GridModel, ScheduleEntry, SessionType,
};

/// Optional attribute overrides for a new placement.
#[derive(Debug, Clone, Default)]
pub struct PlacementOptions {
    /// Explicit faculty, overriding catalog defaults.
    pub faculty: Option<String>,
    /// Explicit venue, overriding catalog defaults.
    pub venue: Option<String>,
}

/// Why a placement or move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The target period is not a placeable period column.
    InvalidPeriod,
    /// A two-period lab span is not contiguous at the target.
    BrokenContiguity,
    /// A move was requested from a cell with no occupants.
    EmptyOrigin,
    /// A manual cell edit supplied an inconsistent group (mixed courses,
    /// non-singleton mentor/elective, or a lab half).
    InvalidGroup,
}

/// Result of a placement or move attempt.
#[derive(Debug, Clone)]
pub enum PlacementOutcome {
    /// The operation succeeded; `entries` is the full replacement list.
    Placed {
        /// New consistent entry list to commit.
        entries: Vec<ScheduleEntry>,
        /// Units removed because no relocation slot existed.
        dropped: Vec<DroppedClass>,
    },
    /// The operation was refused; no state change.
    Refused(RefusalReason),
}

/// Validates a destination span for a session kind.
fn check_destination(
    grid: &GridModel,
    period: u8,
    session_type: SessionType,
) -> Option<RefusalReason> {
    if !grid.is_valid_period(period) {
        return Some(RefusalReason::InvalidPeriod);
    }
    let span = session_type.span();
    if span > 1 && !grid.is_contiguous(period, span) {
        return Some(RefusalReason::BrokenContiguity);
    }
    None
}

/// Places a palette course at `(day, period)`.
///
/// Builds one entry (or a lab pair at `period` and `period+1`) and inserts
/// it through collision resolution; the zero-collision case is a trivial
/// append.
#[allow(clippy::too_many_arguments)]
pub fn place(
    current: &[ScheduleEntry],
    grid: &GridModel,
    department: &str,
    semester: u8,
    course: &CourseDescriptor,
    day: DayOfWeek,
    period: u8,
    options: &PlacementOptions,
) -> PlacementOutcome {
    if let Some(reason) = check_destination(grid, period, course.session_type) {
        return PlacementOutcome::Refused(reason);
    }

    let mut new_entries = Vec::new();
    for offset in 0..course.session_type.span() {
        let mut entry = ScheduleEntry::new(department, semester, course, day, period + offset);
        entry.faculty = options.faculty.clone();
        entry.venue = options.venue.clone();
        new_entries.push(entry);
    }

    debug!(
        course = %course.code,
        day = day.label(),
        period,
        "placing course"
    );

    let mut working = current.to_vec();
    let dropped = insert_with_resolution(&mut working, grid, new_entries);
    PlacementOutcome::Placed {
        entries: working,
        dropped,
    }
}

/// Moves the logical unit occupying `origin` to `(day, period)`.
///
/// The unit anchored at the origin cell (its section group plus, for a
/// lab, the pair half next door) leaves its origin cell(s) first;
/// insertion at the destination then reuses the unit's own attributes
/// (course, faculty, venue, sections) rather than a fresh course lookup.
/// A second meeting of the same course elsewhere on the day is a separate
/// unit and stays where it is.
pub fn move_class(
    current: &[ScheduleEntry],
    grid: &GridModel,
    origin: CellKey,
    day: DayOfWeek,
    period: u8,
) -> PlacementOutcome {
    let mut unit = collect_unit(current, origin.day, origin.period);
    let Some(anchor) = unit.first().cloned() else {
        return PlacementOutcome::Refused(RefusalReason::EmptyOrigin);
    };

    if let Some(reason) = check_destination(grid, period, anchor.session_type) {
        return PlacementOutcome::Refused(reason);
    }

    let mut working: Vec<ScheduleEntry> = current
        .iter()
        .filter(|e| !unit.contains(e))
        .cloned()
        .collect();

    // Rebuild the unit at the destination, preserving internal offsets.
    let base = unit.iter().map(|e| e.period).min().unwrap_or(origin.period);
    for entry in &mut unit {
        entry.day = day;
        entry.period = period + (entry.period - base);
    }

    debug!(
        course = %anchor.course_code,
        from_day = origin.day.label(),
        from_period = origin.period,
        to_day = day.label(),
        to_period = period,
        "moving class"
    );

    let dropped = insert_with_resolution(&mut working, grid, unit);
    PlacementOutcome::Placed {
        entries: working,
        dropped,
    }
}
