//! Interactive timetable editing engine.
//!
//! Edits a weekly class schedule laid out on a (day, period) grid. Drops
//! are never rejected just because the target is occupied: the engine
//! displaces the occupants and relocates each one to the nearest valid
//! free slot, preserving lab two-period contiguity and every grid
//! invariant. An explicit swap mode exchanges two occupied cells
//! atomically, and a bounded history undoes whole-schedule states.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeSlotDefinition`, `GridModel`,
//!   `ScheduleEntry`, `CourseDescriptor`
//! - **`store`**: Entry arena with per-cell indices
//! - **`engine`**: Placement, collision resolution, relocation search, swap
//! - **`history`**: Bounded undo stack
//! - **`services`**: Collaborator traits (configuration, persistence,
//!   catalog, availability, export) with in-memory implementations
//! - **`session`**: `SchedulerSession`, the per-(department, semester)
//!   façade the UI drives
//!
//! # Example
//!
//! ```
//! use timegrid::models::{CourseDescriptor, DayOfWeek, GridModel, SessionType, TimeSlotDefinition};
//! use timegrid::engine::PlacementOptions;
//! use timegrid::session::SchedulerSession;
//!
//! let slots: Vec<TimeSlotDefinition> = (1..=4)
//!     .map(|p| {
//!         let start = 540 + (p as u16 - 1) * 60;
//!         TimeSlotDefinition::regular(DayOfWeek::Monday, p, start, start + 60)
//!     })
//!     .collect();
//!
//! let mut session = SchedulerSession::new("CSE", 4, GridModel::derive(&slots), Vec::new());
//! let lab = CourseDescriptor::new("CS201", "Data Structures Lab", SessionType::Lab);
//! let outcome = session.place(&lab, DayOfWeek::Monday, 3, &PlacementOptions::default());
//! assert!(outcome.is_applied());
//! assert_eq!(session.entries().len(), 2); // lab pair at periods 3 and 4
//! ```

pub mod engine;
pub mod error;
pub mod history;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

pub use error::{EngineError, Result};
pub use session::{EditOutcome, SchedulerSession, SwapOutcome};
