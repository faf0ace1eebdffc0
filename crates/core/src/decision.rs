//! Candidate placements and the chosen decision.

use serde::{Deserialize, Serialize};

use crate::Piece;

/// Surface features measured after a candidate drop.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct OutcomeFeatures {
    pub gaps: usize,
    pub gap_depth: usize,
    pub wells: usize,
    /// Landing row of the piece's bounding box (grid height when nothing lands).
    pub row: i32,
}

/// One fully specified candidate: which piece lands where, and what it leaves behind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Piece actually placed, already rotated. `None` when a hold swap came back empty.
    pub piece: Option<Piece>,
    pub rotation: u8,
    pub column: usize,
    pub hold_used: bool,
    pub features: OutcomeFeatures,
}

impl Outcome {
    /// Candidate that places nothing: no piece, or a hold into an empty slot.
    pub fn empty(grid_height: usize, hold_used: bool) -> Self {
        Self {
            piece: None,
            rotation: 0,
            column: 0,
            hold_used,
            features: OutcomeFeatures {
                row: grid_height as i32,
                ..OutcomeFeatures::default()
            },
        }
    }

    pub fn row(&self) -> i32 {
        self.features.row
    }

    pub fn is_placement(&self) -> bool {
        self.piece.is_some()
    }
}

/// The outcome selected for this turn together with its cost. Read-only.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Decision {
    outcome: Outcome,
    cost: i64,
}

impl Decision {
    pub fn new(outcome: Outcome, cost: i64) -> Self {
        Self { outcome, cost }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn piece(&self) -> Option<Piece> {
        self.outcome.piece
    }

    pub fn rotation(&self) -> u8 {
        self.outcome.rotation
    }

    pub fn column(&self) -> usize {
        self.outcome.column
    }

    pub fn hold_used(&self) -> bool {
        self.outcome.hold_used
    }

    pub fn row(&self) -> i32 {
        self.outcome.row()
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn is_placement(&self) -> bool {
        self.outcome.is_placement()
    }
}
