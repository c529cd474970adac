//! Derived grid layout model.
//!
//! Turns the flat time-slot configuration into an ordered sequence of grid
//! columns (teaching periods interleaved with break/lunch columns) plus the
//! set of period numbers that are legally placeable.
//!
//! # Derivation
//! Slots of one representative day are sorted by start time. A gap of at
//! least [`MIN_BREAK_GAP_MIN`] minutes between consecutive slots synthesizes
//! a break column spanning the gap. Lunch and special slots map to labelled
//! break columns; regular slots map to period columns and feed
//! `valid_periods`.
//!
//! # Invariants
//! Period columns appear in strictly increasing period order. A two-period
//! lab block may only span two period columns that are adjacent in the
//! column sequence — a break or lunch column between them breaks contiguity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::slot::{DayOfWeek, SlotKind, TimeSlotDefinition};

/// Minimum gap (minutes) between consecutive slots that synthesizes a
/// break column.
pub const MIN_BREAK_GAP_MIN: u16 = 10;

/// One column of the rendered weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridColumn {
    /// A regular teaching period.
    Period {
        /// Period number (placement key).
        period: u8,
        /// Start, minutes since midnight.
        start_min: u16,
        /// End, minutes since midnight.
        end_min: u16,
    },
    /// A break, lunch, or other non-teaching column. Never a placement
    /// target.
    Break {
        /// Display label ("Break", "Lunch", ...).
        label: String,
        /// Start, minutes since midnight.
        start_min: u16,
        /// End, minutes since midnight.
        end_min: u16,
    },
}

impl GridColumn {
    /// Period number if this is a period column.
    #[inline]
    pub fn period(&self) -> Option<u8> {
        match self {
            GridColumn::Period { period, .. } => Some(*period),
            GridColumn::Break { .. } => None,
        }
    }

    /// Whether this is a teaching-period column.
    #[inline]
    pub fn is_period(&self) -> bool {
        matches!(self, GridColumn::Period { .. })
    }
}

/// The derived grid: ordered columns, placeable periods, active days.
///
/// Computed once per load from the slot collaborator and read-only input
/// to every other engine component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridModel {
    columns: Vec<GridColumn>,
    valid_periods: BTreeSet<u8>,
    active_days: Vec<DayOfWeek>,
}

impl GridModel {
    /// Derives the grid from the raw slot configuration.
    ///
    /// The schedule is assumed structurally identical across active days,
    /// so columns are derived from the first active day's slots. Active
    /// days are the distinct days present, in canonical weekday order.
    pub fn derive(slots: &[TimeSlotDefinition]) -> Self {
        let mut active_days: Vec<DayOfWeek> = Vec::new();
        for slot in slots {
            if !active_days.contains(&slot.day) {
                active_days.push(slot.day);
            }
        }
        active_days.sort();

        let mut day_slots: Vec<&TimeSlotDefinition> = match active_days.first() {
            Some(&day) => slots.iter().filter(|s| s.day == day).collect(),
            None => Vec::new(),
        };
        day_slots.sort_by_key(|s| s.start_min);

        let mut columns = Vec::new();
        let mut valid_periods = BTreeSet::new();
        let mut prev_end: Option<u16> = None;

        for slot in day_slots {
            // Synthesize a break column for a significant gap between slots.
            if let Some(end) = prev_end {
                if slot.start_min >= end + MIN_BREAK_GAP_MIN {
                    columns.push(GridColumn::Break {
                        label: "Break".to_string(),
                        start_min: end,
                        end_min: slot.start_min,
                    });
                }
            }

            match (slot.kind, slot.period) {
                (SlotKind::Regular, Some(period)) => {
                    valid_periods.insert(period);
                    columns.push(GridColumn::Period {
                        period,
                        start_min: slot.start_min,
                        end_min: slot.end_min,
                    });
                }
                (SlotKind::Lunch, _) => columns.push(GridColumn::Break {
                    label: "Lunch".to_string(),
                    start_min: slot.start_min,
                    end_min: slot.end_min,
                }),
                // Break/special slots, and regular slots missing a period
                // number (malformed configuration), render as breaks.
                _ => columns.push(GridColumn::Break {
                    label: "Break".to_string(),
                    start_min: slot.start_min,
                    end_min: slot.end_min,
                }),
            }

            prev_end = Some(slot.end_min);
        }

        Self {
            columns,
            valid_periods,
            active_days,
        }
    }

    /// Ordered grid columns.
    #[inline]
    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    /// Period numbers that are legal placement targets.
    #[inline]
    pub fn valid_periods(&self) -> &BTreeSet<u8> {
        &self.valid_periods
    }

    /// Days carrying at least one configured slot, in canonical order.
    #[inline]
    pub fn active_days(&self) -> &[DayOfWeek] {
        &self.active_days
    }

    /// Whether `period` is a legal placement target.
    #[inline]
    pub fn is_valid_period(&self, period: u8) -> bool {
        self.valid_periods.contains(&period)
    }

    /// Whether `span` consecutive periods starting at `start` occupy
    /// adjacent period columns.
    ///
    /// Contiguity requires both a consecutive run of period numbers and no
    /// intervening break/lunch column in the grid.
    pub fn is_contiguous(&self, start: u8, span: u8) -> bool {
        if span == 0 {
            return false;
        }
        let Some(first) = self
            .columns
            .iter()
            .position(|c| c.period() == Some(start))
        else {
            return false;
        };
        for offset in 1..span {
            let Some(expected) = start.checked_add(offset) else {
                return false;
            };
            match self.columns.get(first + offset as usize) {
                Some(col) if col.period() == Some(expected) => {}
                _ => return false,
            }
        }
        true
    }
}
