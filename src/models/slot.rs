//! Raw time-slot configuration model.
//!
//! Time slots are owned by an external configuration collaborator and are
//! read-only input to the engine. The grid model (see [`super::grid`])
//! derives the displayable column layout and the set of placeable periods
//! from them.
//!
//! # Time Model
//! Slot boundaries are minutes since midnight on the slot's day. The
//! schedule is assumed structurally identical across active days, so the
//! grid is derived from one representative day.

use serde::{Deserialize, Serialize};

/// A day of the teaching week, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in canonical order (Monday first).
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Short display label ("Mon", "Tue", ...).
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
            DayOfWeek::Sunday => "Sun",
        }
    }
}

/// Classification of a configured time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    /// A regular teaching period (carries a period number).
    Regular,
    /// A short recess between periods.
    Break,
    /// The lunch recess.
    Lunch,
    /// Assembly, sports hour, or other non-teaching slot.
    Special,
}

/// One configured time slot on one day.
///
/// Source of truth for which periods exist and in what order. Non-regular
/// slots have no period number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotDefinition {
    /// Day this slot belongs to.
    pub day: DayOfWeek,
    /// Period number for `Regular` slots; `None` otherwise.
    pub period: Option<u8>,
    /// Start, minutes since midnight.
    pub start_min: u16,
    /// End, minutes since midnight.
    pub end_min: u16,
    /// Slot classification.
    pub kind: SlotKind,
}

impl TimeSlotDefinition {
    /// Creates a regular teaching period.
    pub fn regular(day: DayOfWeek, period: u8, start_min: u16, end_min: u16) -> Self {
        Self {
            day,
            period: Some(period),
            start_min,
            end_min,
            kind: SlotKind::Regular,
        }
    }

    /// Creates a non-regular slot (break, lunch, special).
    pub fn non_regular(day: DayOfWeek, kind: SlotKind, start_min: u16, end_min: u16) -> Self {
        Self {
            day,
            period: None,
            start_min,
            end_min,
            kind,
        }
    }

    /// Slot duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min.saturating_sub(self.start_min)
    }
}
