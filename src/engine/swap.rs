//! Two-state swap machine.
//!
//! Swap mode exchanges two occupied cells atomically. The controller is a
//! small state machine: `Idle` (no selection) arms on a click over an
//! occupied cell; a second click either deselects (same cell), rejects
//! (different session type), or executes the exchange. The mode toggle
//! itself is sticky — it survives completed swaps until explicitly turned
//! off.
//!
//! Both logical groups move as wholes (a lab pair keeps its internal
//! period offsets) and nobody else is displaced: the two cells are, by
//! construction, already occupied and simply trade places. Swap never
//! invokes the relocation search.

use tracing::{debug, warn};

use crate::engine::collision::collect_unit;
use crate::models::{CellKey, ScheduleEntry};

/// Selection state of the swap controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapState {
    /// No source cell selected.
    #[default]
    Idle,
    /// A source cell is selected and awaiting its partner.
    Armed(CellKey),
}

/// Outcome of one click while swap mode is enabled.
#[derive(Debug, Clone)]
pub enum SwapClick {
    /// The clicked cell became the swap source.
    Armed(CellKey),
    /// The selection was cleared without swapping.
    Disarmed,
    /// The click hit an empty cell (or swap mode is off); nothing changed.
    Ignored,
    /// The two cells hold different session kinds; selection cleared.
    TypeMismatch {
        /// User-facing rejection text.
        message: String,
    },
    /// The exchange succeeded; `entries` is the full replacement list.
    Swapped {
        /// New consistent entry list to commit.
        entries: Vec<ScheduleEntry>,
    },
}

/// Sticky swap-mode toggle plus the idle/armed selection machine.
#[derive(Debug, Clone, Default)]
pub struct SwapController {
    enabled: bool,
    state: SwapState,
}

impl SwapController {
    /// Creates a controller with swap mode off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether swap mode is on.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Current selection state.
    #[inline]
    pub fn state(&self) -> SwapState {
        self.state
    }

    /// Turns swap mode on or off. Turning it off clears any selection.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = SwapState::Idle;
        }
    }

    /// Handles a cell click against the current entry list.
    ///
    /// On [`SwapClick::Swapped`] the caller commits the returned list; all
    /// other outcomes leave the list untouched.
    pub fn click(&mut self, current: &[ScheduleEntry], cell: CellKey) -> SwapClick {
        if !self.enabled {
            return SwapClick::Ignored;
        }

        let clicked_unit = collect_unit(current, cell.day, cell.period);

        match self.state {
            SwapState::Idle => {
                if clicked_unit.is_empty() {
                    return SwapClick::Ignored;
                }
                self.state = SwapState::Armed(cell);
                debug!(day = cell.day.label(), period = cell.period, "swap source armed");
                SwapClick::Armed(cell)
            }
            SwapState::Armed(source) => {
                if cell == source {
                    self.state = SwapState::Idle;
                    return SwapClick::Disarmed;
                }
                if clicked_unit.is_empty() {
                    // Keep the selection; an empty target is not a partner.
                    return SwapClick::Ignored;
                }

                let source_unit = collect_unit(current, source.day, source.period);
                if source_unit.is_empty() {
                    // The armed cell was emptied by a later edit; a stale
                    // selection cannot anchor a swap.
                    self.state = SwapState::Idle;
                    return SwapClick::Disarmed;
                }
                // Clicking the other half of the armed lab selects the same
                // unit; treat it as a deselect rather than a self-swap.
                if source_unit
                    .iter()
                    .any(|e| clicked_unit.contains(e))
                {
                    self.state = SwapState::Idle;
                    return SwapClick::Disarmed;
                }

                let source_kind = source_unit[0].session_type;
                let clicked_kind = clicked_unit[0].session_type;
                self.state = SwapState::Idle;

                if source_kind != clicked_kind {
                    let message = format!(
                        "Cannot swap {} with {}",
                        source_kind.label(),
                        clicked_kind.label()
                    );
                    warn!(%message, "swap rejected");
                    return SwapClick::TypeMismatch { message };
                }

                SwapClick::Swapped {
                    entries: exchange(current, &source_unit, &clicked_unit),
                }
            }
        }
    }
}

/// Builds the replacement list with the two units' day/period exchanged,
/// preserving each unit's internal period offsets.
fn exchange(
    current: &[ScheduleEntry],
    unit_a: &[ScheduleEntry],
    unit_b: &[ScheduleEntry],
) -> Vec<ScheduleEntry> {
    let base_a = unit_a.iter().map(|e| e.period).min().unwrap_or(0);
    let base_b = unit_b.iter().map(|e| e.period).min().unwrap_or(0);
    let day_a = unit_a[0].day;
    let day_b = unit_b[0].day;

    let mut entries: Vec<ScheduleEntry> = current
        .iter()
        .filter(|e| !unit_a.contains(e) && !unit_b.contains(e))
        .cloned()
        .collect();

    for entry in unit_a {
        let mut moved = entry.clone();
        moved.day = day_b;
        moved.period = base_b + (entry.period - base_a);
        entries.push(moved);
    }
    for entry in unit_b {
        let mut moved = entry.clone();
        moved.day = day_a;
        moved.period = base_a + (entry.period - base_b);
        entries.push(moved);
    }

    entries
}
