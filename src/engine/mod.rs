//! Placement, collision, relocation, and swap engines.
//!
//! The algorithmic heart of the editor. All four modules are pure over an
//! entry list: they compute a full replacement list (or a refusal) and the
//! session commits it atomically.
//!
//! # Pipeline
//!
//! Drop and click gestures route through [`placement`] or [`swap`]; an
//! occupied target sends [`placement`] through [`collision`], which leans
//! on [`relocation`] to re-home each displaced unit.

pub mod collision;
pub mod placement;
pub mod relocation;
pub mod swap;

pub use collision::DroppedClass;
pub use placement::{PlacementOptions, PlacementOutcome, RefusalReason};
pub use relocation::RELOCATION_SCAN_LIMIT;
pub use swap::{SwapClick, SwapController, SwapState};
