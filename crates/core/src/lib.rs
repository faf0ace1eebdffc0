//! Stackbot core crate - shapes, pieces, the playfield grid and decision records.

mod decision;
mod error;
mod grid;
mod piece;
mod shape;

pub use decision::{Decision, Outcome, OutcomeFeatures};
pub use error::GridError;
pub use grid::{Grid, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use piece::{Piece, MAX_SIZE};
pub use shape::Shape;
