//! Collision detection and displacement resolution.
//!
//! When an insertion targets occupied cells, the occupants are not a
//! reason to refuse the drop. Instead the complete set of occupying
//! logical units is collected (both halves of a lab, every parallel
//! section of a cell), removed, and each unit is offered the nearest free
//! slot by the relocation search. Units that cannot be relocated are
//! dropped and reported as soft warnings; the insertion itself always
//! completes.
//!
//! # Ordering
//!
//! Displaced units are relocated in the order their collisions were
//! discovered, against the list as progressively updated by the newcomer
//! and earlier relocations, so later relocations never land on earlier
//! ones.

use tracing::{debug, warn};

use crate::engine::relocation::find_relocation_slot;
use crate::models::{DayOfWeek, GridModel, ScheduleEntry, SessionType};

/// A logical unit displaced by an insertion.
#[derive(Debug, Clone)]
struct DisplacedUnit {
    /// The unit's entries, removed from the working list.
    entries: Vec<ScheduleEntry>,
    /// Period at which the collision was detected; relocation search
    /// origin.
    pivot: u8,
}

impl DisplacedUnit {
    /// Lowest period the unit occupied.
    fn base_period(&self) -> u8 {
        self.entries.iter().map(|e| e.period).min().unwrap_or(0)
    }

    /// Number of consecutive periods the unit spans (1, or 2 for labs).
    fn span(&self) -> u8 {
        let mut periods: Vec<u8> = self.entries.iter().map(|e| e.period).collect();
        periods.sort_unstable();
        periods.dedup();
        periods.len() as u8
    }
}

/// A class removed from the schedule because no relocation slot existed.
///
/// Reported to the caller as a non-fatal warning; the triggering operation
/// still completes for every other unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedClass {
    /// Course code of the dropped class.
    pub course_code: String,
    /// Course name of the dropped class.
    pub course_name: String,
    /// Session kind of the dropped class.
    pub session_type: SessionType,
    /// Day the class occupied.
    pub day: DayOfWeek,
    /// Period at which it was displaced.
    pub from_period: u8,
}

impl DroppedClass {
    /// User-facing warning text.
    pub fn message(&self) -> String {
        format!(
            "Could not relocate {} ({}) on {}; removed from the schedule",
            self.course_code,
            self.session_type.label(),
            self.day.label()
        )
    }
}

/// Inserts `new_entries` (one cell, or a lab pair) into `working`,
/// displacing and relocating any occupants of the target span.
///
/// `new_entries` must be non-empty, share one day, and already satisfy the
/// placement preconditions (valid periods, lab contiguity); the placement
/// engine checks those before calling here. Returns the units that had to
/// be dropped. The zero-collision case is a plain append.
pub fn insert_with_resolution(
    working: &mut Vec<ScheduleEntry>,
    grid: &GridModel,
    new_entries: Vec<ScheduleEntry>,
) -> Vec<DroppedClass> {
    debug_assert!(!new_entries.is_empty());
    let day = new_entries[0].day;
    let base = new_entries.iter().map(|e| e.period).min().unwrap_or(0);
    let span = new_entries[0].session_type.span();

    // Collect occupying units over the target span, deduplicating units
    // already pulled in through a lab pair or section group.
    let mut displaced: Vec<DisplacedUnit> = Vec::new();
    for offset in 0..span {
        let period = base + offset;
        let unit = collect_unit(working, day, period);
        if unit.is_empty() {
            continue;
        }
        let already_collected = displaced
            .iter()
            .any(|d| d.entries.iter().any(|e| unit.contains(e)));
        if !already_collected {
            displaced.push(DisplacedUnit {
                entries: unit,
                pivot: period,
            });
        }
    }

    // Remove every displaced entry, then insert the newcomer.
    for unit in &displaced {
        working.retain(|e| !unit.entries.contains(e));
    }
    working.extend(new_entries);

    if displaced.is_empty() {
        return Vec::new();
    }

    // Relocate each unit against the progressively updated list.
    let mut dropped = Vec::new();
    for unit in displaced {
        let span = unit.span();
        match find_relocation_slot(working, grid, day, unit.pivot, span) {
            Some(start) => {
                let unit_base = unit.base_period();
                debug!(
                    course = %unit.entries[0].course_code,
                    day = unit.entries[0].day.label(),
                    from = unit_base,
                    to = start,
                    "relocated displaced class"
                );
                for mut entry in unit.entries {
                    entry.period = start + (entry.period - unit_base);
                    working.push(entry);
                }
            }
            None => {
                let lead = &unit.entries[0];
                let report = DroppedClass {
                    course_code: lead.course_code.clone(),
                    course_name: lead.course_name.clone(),
                    session_type: lead.session_type,
                    day: lead.day,
                    from_period: unit.base_period(),
                };
                warn!(
                    course = %report.course_code,
                    day = report.day.label(),
                    period = report.from_period,
                    "no relocation slot found; class dropped"
                );
                dropped.push(report);
            }
        }
    }

    dropped
}

/// Collects the complete logical unit occupying `(day, period)` in a
/// working list: the cell's group plus, for labs, the matching pair half
/// from a neighbouring period.
pub(crate) fn collect_unit(
    working: &[ScheduleEntry],
    day: DayOfWeek,
    period: u8,
) -> Vec<ScheduleEntry> {
    let mut unit: Vec<ScheduleEntry> = working
        .iter()
        .filter(|e| e.day == day && e.period == period)
        .cloned()
        .collect();

    if let Some(primary) = unit.first() {
        if primary.session_type == SessionType::Lab {
            let code = primary.course_code.clone();
            for neighbour in [period.checked_sub(1), period.checked_add(1)]
                .into_iter()
                .flatten()
            {
                unit.extend(
                    working
                        .iter()
                        .filter(|e| {
                            e.day == day
                                && e.period == neighbour
                                && e.session_type == SessionType::Lab
                                && e.course_code == code
                        })
                        .cloned(),
                );
            }
        }
    }

    unit.sort_by_key(|e| (e.period, e.section));
    unit
}
