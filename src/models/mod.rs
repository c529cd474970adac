//! Timetable domain models.
//!
//! Provides the core data types the editing engine operates over: raw
//! time-slot configuration, the derived grid layout, and schedule entries.
//!
//! # Layering
//!
//! | Model | Role |
//! |-------|------|
//! | `TimeSlotDefinition` | Raw configuration, owned by a collaborator |
//! | `GridModel` / `GridColumn` | Derived layout, read-only to the engine |
//! | `ScheduleEntry` | Authoritative cell occupancy, owned by the store |

mod entry;
mod grid;
mod slot;

pub use entry::{CellKey, CourseDescriptor, ScheduleEntry, SessionType};
pub use grid::{GridColumn, GridModel, MIN_BREAK_GAP_MIN};
pub use slot::{DayOfWeek, SlotKind, TimeSlotDefinition};
