use serde::{Deserialize, Serialize};
use stackbot_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

use crate::queue::DEFAULT_QUEUE_LENGTH;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub queue_length: usize,
    /// Fixed seed for a reproducible piece stream; entropy when absent.
    pub seed: Option<u64>,
    /// Start the game with the first queued piece already in the hold slot.
    pub prefill_hold: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            queue_length: DEFAULT_QUEUE_LENGTH,
            seed: None,
            prefill_hold: true,
        }
    }
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
