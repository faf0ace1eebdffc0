//! Translate a decision into abstract inputs for an external actuator.
//!
//! Inputs are relative to the spawn position: rotate first, then shift the
//! piece sideways, then hard drop. Mapping inputs to keys is left to the caller.

use serde::{Deserialize, Serialize};
use stackbot_core::Decision;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    Hold,
    RotateCw,
    RotateCcw,
    Left,
    Right,
    HardDrop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maneuver {
    pub hold: bool,
    /// Clockwise quarter turns; three turns are issued as one counter-clockwise turn.
    pub rotations: u8,
    /// Columns to move after rotating; negative is left.
    pub shift: i32,
    pub drop: bool,
}

impl Maneuver {
    pub fn from_decision(decision: &Decision) -> Self {
        let Some(piece) = decision.piece() else {
            return Self {
                hold: decision.hold_used(),
                rotations: 0,
                shift: 0,
                drop: false,
            };
        };
        let origin = piece.spawn_column() as i32 + piece.rotation_column_offset() as i32;
        Self {
            hold: decision.hold_used(),
            rotations: piece.rotation(),
            shift: decision.column() as i32 - origin,
            drop: true,
        }
    }

    pub fn inputs(&self) -> Vec<Input> {
        let mut inputs = Vec::new();
        if self.hold {
            inputs.push(Input::Hold);
        }
        if !self.drop {
            return inputs;
        }
        match self.rotations {
            3 => inputs.push(Input::RotateCcw),
            n => inputs.extend(std::iter::repeat(Input::RotateCw).take(n as usize)),
        }
        let step = if self.shift < 0 { Input::Left } else { Input::Right };
        inputs.extend(std::iter::repeat(step).take(self.shift.unsigned_abs() as usize));
        inputs.push(Input::HardDrop);
        inputs
    }
}
