//! stackbot-engine - authoritative game state around the core grid.
//!
//! Provides the hold slot, the piece queue, decision application and the
//! translation of decisions into actuator inputs.

pub mod apply;
pub mod config;
pub mod game;
pub mod hold;
pub mod maneuver;
pub mod queue;

pub use apply::apply_decision;
pub use config::GameConfig;
pub use game::Game;
pub use hold::HoldSlot;
pub use maneuver::{Input, Maneuver};
pub use queue::{PieceQueue, DEFAULT_QUEUE_LENGTH};
