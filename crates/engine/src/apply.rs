use stackbot_core::{Decision, Grid, GridError, Piece};

use crate::HoldSlot;

/// Apply a solver decision to the authoritative grid and hold slot.
///
/// With `hold_used` the current piece goes into the slot and the previously
/// held piece (if any) is the one placed. The placement is validated before the
/// hold swap, so a rejected decision changes nothing. Returns the landing row,
/// or `None` when nothing was placed.
pub fn apply_decision(
    grid: &mut Grid,
    hold: &mut HoldSlot,
    current: Piece,
    decision: &Decision,
) -> Result<Option<i32>, GridError> {
    let active = if decision.hold_used() {
        hold.held().copied()
    } else {
        Some(current)
    };

    let Some(mut active) = active else {
        if decision.hold_used() {
            hold.swap(current);
        }
        return Ok(None);
    };

    active.reset_rotation().rotate(decision.rotation() as i32);
    grid.compute_drop_row(&active, decision.column())?;

    if decision.hold_used() {
        hold.swap(current);
    }
    grid.drop(&active, decision.column()).map(Some)
}
