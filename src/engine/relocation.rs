//! Bounded relocation search for displaced units.
//!
//! # Algorithm
//!
//! From the pivot period where the collision was detected, candidate start
//! periods are tried outward on the same day: first `pivot-1, pivot-2, …`
//! down to (and excluding) 0, then `pivot+1, pivot+2, …` up to
//! [`RELOCATION_SCAN_LIMIT`]. The first candidate whose whole span is
//! period-valid, contiguous (for two-period units), and unoccupied wins.
//!
//! # Policy
//!
//! Left is fully exhausted before right is attempted; together with the
//! hard scan bound this keeps a displaced class temporally close to its
//! original slot and guarantees termination. A symmetric
//! nearest-of-either-side scan would be equally defensible; the
//! left-first tie-break is kept as the deterministic product behaviour.

use crate::models::{DayOfWeek, GridModel, ScheduleEntry};

/// Hard upper bound on candidate start periods scanned to the right.
pub const RELOCATION_SCAN_LIMIT: u8 = 20;

/// Finds the nearest free start period for a displaced unit of `span`
/// periods on `day`, scanning left from `pivot` and then right.
///
/// The occupancy test runs against `working`, the list as already updated
/// by the newcomer and any earlier relocations of the same resolution
/// pass, so later relocations never collide with earlier ones.
pub fn find_relocation_slot(
    working: &[ScheduleEntry],
    grid: &GridModel,
    day: DayOfWeek,
    pivot: u8,
    span: u8,
) -> Option<u8> {
    for start in (1..pivot).rev() {
        if span_is_open(working, grid, day, start, span) {
            return Some(start);
        }
    }
    for start in pivot.saturating_add(1)..=RELOCATION_SCAN_LIMIT {
        if span_is_open(working, grid, day, start, span) {
            return Some(start);
        }
    }
    None
}

/// Whether `span` periods starting at `start` on `day` are all valid,
/// mutually contiguous, and unoccupied in `working`.
pub fn span_is_open(
    working: &[ScheduleEntry],
    grid: &GridModel,
    day: DayOfWeek,
    start: u8,
    span: u8,
) -> bool {
    if span > 1 && !grid.is_contiguous(start, span) {
        return false;
    }
    for offset in 0..span {
        let Some(period) = start.checked_add(offset) else {
            return false;
        };
        if !grid.is_valid_period(period) {
            return false;
        }
        if working.iter().any(|e| e.day == day && e.period == period) {
            return false;
        }
    }
    true
}
