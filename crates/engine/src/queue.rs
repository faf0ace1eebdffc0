//! Fixed-length look-ahead of upcoming pieces.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stackbot_core::Piece;

pub const DEFAULT_QUEUE_LENGTH: usize = 3;

/// Every piece is drawn independently and uniformly from the seven shapes.
#[derive(Clone, Debug)]
pub struct PieceQueue<R = StdRng> {
    pieces: VecDeque<Piece>,
    rng: R,
}

impl PieceQueue<StdRng> {
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, StdRng::from_entropy())
    }

    /// Reproducible piece stream.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }
}

impl Default for PieceQueue<StdRng> {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_LENGTH)
    }
}

impl<R: Rng> PieceQueue<R> {
    pub fn with_rng(length: usize, mut rng: R) -> Self {
        let pieces = (0..length).map(|_| Piece::random(&mut rng)).collect();
        Self { pieces, rng }
    }

    /// Refill the back, then pop the front. The length never changes.
    pub fn get_next(&mut self) -> Piece {
        let fresh = Piece::random(&mut self.rng);
        self.pieces.push_back(fresh);
        self.pieces.pop_front().unwrap_or(fresh)
    }

    pub fn peek(&self) -> Option<&Piece> {
        self.pieces.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_constant() {
        let mut queue = PieceQueue::seeded(3, 1);
        assert_eq!(queue.len(), 3);
        for _ in 0..50 {
            queue.get_next();
            assert_eq!(queue.len(), 3);
        }
    }

    #[test]
    fn test_get_next_returns_front() {
        let mut queue = PieceQueue::seeded(3, 42);
        let upcoming: Vec<Piece> = queue.iter().copied().collect();
        assert_eq!(queue.peek(), upcoming.first());
        for expected in upcoming {
            assert_eq!(queue.get_next(), expected);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = PieceQueue::seeded(3, 9);
        let mut b = PieceQueue::seeded(3, 9);
        for _ in 0..20 {
            assert_eq!(a.get_next(), b.get_next());
        }
    }

    #[test]
    fn test_zero_length_queue() {
        let mut queue = PieceQueue::seeded(0, 5);
        assert!(queue.is_empty());
        let piece = queue.get_next();
        assert_eq!(piece.rotation(), 0);
        assert!(queue.is_empty());
    }
}
