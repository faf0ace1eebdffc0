//! Headless game: authoritative grid, queue and hold slot driven by decisions.

use stackbot_core::{Decision, Grid, GridError, Piece};
use tracing::{debug, info, warn};

use crate::{apply_decision, GameConfig, HoldSlot, PieceQueue};

#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    queue: PieceQueue,
    hold: HoldSlot,
    current: Piece,
    turn: u32,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GridError> {
        let grid = Grid::with_size(config.height, config.width)?;
        let mut queue = match config.seed {
            Some(seed) => PieceQueue::seeded(config.queue_length, seed),
            None => PieceQueue::new(config.queue_length),
        };
        let mut hold = HoldSlot::new();
        if config.prefill_hold {
            hold.swap(queue.get_next());
        }
        let current = queue.get_next();
        info!(
            height = config.height,
            width = config.width,
            seed = ?config.seed,
            "game started"
        );
        Ok(Self {
            grid,
            queue,
            hold,
            current,
            turn: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn held(&self) -> Option<&Piece> {
        self.hold.held()
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.grid.is_game_over()
    }

    /// Apply the decision for the current piece and draw the next one.
    pub fn next_turn(&mut self, decision: &Decision) -> Result<Option<i32>, GridError> {
        let row = apply_decision(&mut self.grid, &mut self.hold, self.current, decision)
            .map_err(|err| {
                warn!(turn = self.turn, %err, "decision rejected");
                err
            })?;
        self.current = self.queue.get_next();
        self.turn += 1;
        debug!(
            turn = self.turn,
            row = ?row,
            rows_cleared = self.grid.rows_cleared(),
            next = %self.current,
            "turn complete"
        );
        if self.is_over() {
            info!(
                turns = self.turn,
                pieces = self.grid.pieces_placed(),
                rows_cleared = self.grid.rows_cleared(),
                "game over"
            );
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackbot_core::{Outcome, OutcomeFeatures};

    #[test]
    fn test_new_prefills_hold() {
        let game = Game::new(&GameConfig::seeded(3)).expect("valid config");
        assert!(game.held().is_some());
        assert_eq!(game.queue().len(), 3);
        assert_eq!(game.turn(), 0);
        assert!(!game.is_over());
    }

    #[test]
    fn test_new_without_prefill() {
        let config = GameConfig {
            prefill_hold: false,
            ..GameConfig::seeded(3)
        };
        let game = Game::new(&config).expect("valid config");
        assert!(game.held().is_none());
    }

    #[test]
    fn test_rejects_zero_size() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(Game::new(&config).is_err());
    }

    #[test]
    fn test_next_turn_places_current() {
        let mut game = Game::new(&GameConfig::seeded(11)).expect("valid config");
        let piece = *game.current();
        let upcoming = game.queue().peek().copied();
        let d = Decision::new(
            Outcome {
                piece: Some(piece),
                rotation: 0,
                column: 0,
                hold_used: false,
                features: OutcomeFeatures::default(),
            },
            0,
        );
        let row = game.next_turn(&d).expect("valid decision");
        assert!(row.is_some());
        assert_eq!(game.grid().filled_cells(), 4);
        assert_eq!(game.turn(), 1);
        assert_eq!(Some(*game.current()), upcoming);
    }

    #[test]
    fn test_rejected_turn_keeps_state() {
        let mut game = Game::new(&GameConfig::seeded(11)).expect("valid config");
        let current = *game.current();
        let d = Decision::new(
            Outcome {
                piece: Some(current),
                rotation: 0,
                column: 10,
                hold_used: false,
                features: OutcomeFeatures::default(),
            },
            0,
        );
        assert!(game.next_turn(&d).is_err());
        assert_eq!(game.turn(), 0);
        assert_eq!(*game.current(), current);
    }
}
