use serde::{Deserialize, Serialize};
use stackbot_core::Piece;

/// Single reserved slot. A stored piece always sits at rotation 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldSlot {
    held: Option<Piece>,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Store `piece` and hand back whatever was held before, in one step.
    pub fn swap(&mut self, mut piece: Piece) -> Option<Piece> {
        piece.reset_rotation();
        std::mem::replace(&mut self.held, Some(piece))
    }
}
