//! Enumerate every hold/rotation/column candidate, score it, keep the cheapest.
//!
//! Enumeration order is swap-false before swap-true, then rotation 0..4, then
//! column ascending. The first minimum-cost candidate in that order wins, so the
//! order is the tie-break.

use rayon::prelude::*;
use stackbot_core::{Decision, Grid, GridError, Outcome, Piece};
use stackbot_eval::{cost, measure};
use tracing::{debug, trace};

use crate::SolverConfig;

/// One entry of the candidate list, before simulation.
#[derive(Clone, Copy, Debug)]
enum Candidate {
    /// Hold swapped the active piece out and nothing came back.
    Empty { hold_used: bool },
    Drop {
        piece: Piece,
        column: usize,
        hold_used: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    /// Set when the previous decision placed nothing, so hold cannot loop.
    ban_hold: bool,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ban_hold: false,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn ban_hold(&self) -> bool {
        self.ban_hold
    }

    pub fn set_ban_hold(&mut self, ban_hold: bool) {
        self.ban_hold = ban_hold;
    }

    /// Forget the hold ban, e.g. at the start of a new game.
    pub fn reset(&mut self) {
        self.ban_hold = false;
    }

    fn candidates(&self, grid: &Grid, piece: &Piece, held: Option<&Piece>) -> Vec<Candidate> {
        let mut swap_options = vec![false];
        if !self.ban_hold {
            swap_options.push(true);
        }

        let mut candidates = Vec::with_capacity(swap_options.len() * 4 * grid.width());
        for hold_used in swap_options {
            let active = if hold_used {
                match held {
                    Some(held) => held,
                    None => {
                        candidates.push(Candidate::Empty { hold_used });
                        continue;
                    }
                }
            } else {
                piece
            };
            for n in 0..4 {
                let rotated = active.rotated(n);
                let columns = (grid.width() + 1).saturating_sub(rotated.width());
                candidates.extend((0..columns).map(|column| Candidate::Drop {
                    piece: rotated,
                    column,
                    hold_used,
                }));
            }
        }
        candidates
    }

    fn simulate(grid: &Grid, candidate: &Candidate) -> Result<Outcome, GridError> {
        match *candidate {
            Candidate::Empty { hold_used } => Ok(Outcome::empty(grid.height(), hold_used)),
            Candidate::Drop {
                piece,
                column,
                hold_used,
            } => {
                let mut scratch = grid.copy();
                let row = scratch.drop(&piece, column)?;
                let features = measure(&scratch, row);
                trace!(
                    piece = %piece,
                    rotation = piece.rotation(),
                    column,
                    hold_used,
                    ?features,
                    "candidate"
                );
                Ok(Outcome {
                    piece: Some(piece),
                    rotation: piece.rotation(),
                    column,
                    hold_used,
                    features,
                })
            }
        }
    }

    /// Every reachable outcome for this turn, in canonical enumeration order.
    ///
    /// With no incoming piece there is a single degenerate outcome. Each
    /// candidate is simulated on its own copy of `grid`.
    pub fn enumerate_outcomes(
        &self,
        grid: &Grid,
        piece: Option<&Piece>,
        held: Option<&Piece>,
    ) -> Result<Vec<Outcome>, GridError> {
        let Some(piece) = piece else {
            return Ok(vec![Outcome::empty(grid.height(), false)]);
        };

        let candidates = self.candidates(grid, piece, held);
        if self.config.parallel {
            candidates
                .par_iter()
                .map(|candidate| Self::simulate(grid, candidate))
                .collect()
        } else {
            candidates
                .iter()
                .map(|candidate| Self::simulate(grid, candidate))
                .collect()
        }
    }

    pub fn score(&self, outcome: &Outcome) -> i64 {
        cost(&outcome.features, &self.config.weights)
    }

    /// Pick the first minimum-cost outcome and update the hold ban.
    pub fn decide(
        &mut self,
        grid: &Grid,
        piece: Option<&Piece>,
        held: Option<&Piece>,
    ) -> Result<Decision, GridError> {
        let outcomes = self.enumerate_outcomes(grid, piece, held)?;
        let total = outcomes.len();

        // min_by_key keeps the first of equal minima
        let decision = outcomes
            .into_iter()
            .map(|outcome| Decision::new(outcome, self.score(&outcome)))
            .min_by_key(Decision::cost)
            .unwrap_or_else(|| Decision::new(Outcome::empty(grid.height(), false), 0));

        self.ban_hold = !decision.is_placement();
        debug!(
            candidates = total,
            cost = decision.cost(),
            piece = ?decision.piece(),
            rotation = decision.rotation(),
            column = decision.column(),
            row = decision.row(),
            hold_used = decision.hold_used(),
            ban_hold = self.ban_hold,
            "decision"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackbot_core::Shape;

    fn sequential() -> Solver {
        Solver::new(SolverConfig::sequential())
    }

    #[test]
    fn test_no_piece_single_degenerate_outcome() {
        let solver = sequential();
        let grid = Grid::new();
        let outcomes = solver
            .enumerate_outcomes(&grid, None, None)
            .expect("no placement needed");
        assert_eq!(outcomes, vec![Outcome::empty(22, false)]);
    }

    #[test]
    fn test_candidate_count_without_hold() {
        let mut solver = sequential();
        solver.set_ban_hold(true);
        let grid = Grid::new();
        let t = Piece::new(Shape::T);
        let outcomes = solver
            .enumerate_outcomes(&grid, Some(&t), None)
            .expect("all columns valid");
        // widths 3,2,3,2 -> 8 + 9 + 8 + 9 columns
        assert_eq!(outcomes.len(), 34);
        assert!(outcomes.iter().all(|o| !o.hold_used));
    }

    #[test]
    fn test_empty_hold_adds_single_degenerate() {
        let solver = sequential();
        let grid = Grid::new();
        let i = Piece::new(Shape::I);
        let outcomes = solver
            .enumerate_outcomes(&grid, Some(&i), None)
            .expect("all columns valid");
        // 7 + 10 + 7 + 10 placements, then one empty hold
        assert_eq!(outcomes.len(), 35);
        let last = outcomes.last().expect("non-empty");
        assert!(last.hold_used);
        assert!(last.piece.is_none());
    }

    #[test]
    fn test_enumeration_order() {
        let solver = sequential();
        let grid = Grid::new();
        let o = Piece::new(Shape::O);
        let held = Piece::new(Shape::I);
        let outcomes = solver
            .enumerate_outcomes(&grid, Some(&o), Some(&held))
            .expect("all columns valid");
        let keys: Vec<(bool, u8, usize)> = outcomes
            .iter()
            .map(|o| (o.hold_used, o.rotation, o.column))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], (false, 0, 0));
        assert!(outcomes
            .iter()
            .filter(|o| o.hold_used)
            .all(|o| o.piece.map(|p| p.shape()) == Some(Shape::I)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = Grid::with_stack(
            22,
            10,
            "
            ..J....T..
            .JJ..TTT.S
            ",
        )
        .expect("stack");
        let piece = Piece::new(Shape::L);
        let held = Piece::new(Shape::Z);
        let seq = sequential()
            .enumerate_outcomes(&grid, Some(&piece), Some(&held))
            .expect("valid");
        let par = Solver::default()
            .enumerate_outcomes(&grid, Some(&piece), Some(&held))
            .expect("valid");
        assert_eq!(seq, par);
    }

    #[test]
    fn test_enumeration_leaves_grid_untouched() {
        let grid = Grid::with_stack(22, 10, "IIII..OO..").expect("stack");
        let before = grid.clone();
        let _ = sequential()
            .enumerate_outcomes(&grid, Some(&Piece::new(Shape::S)), None)
            .expect("valid");
        assert_eq!(grid, before);
    }

    #[test]
    fn test_decide_prefers_flat_placement() {
        let mut solver = sequential();
        solver.set_ban_hold(true);
        let grid = Grid::new();
        let d = solver
            .decide(&grid, Some(&Piece::new(Shape::I)), None)
            .expect("valid");
        assert_eq!(d.rotation(), 0);
        assert_eq!(d.column(), 0);
        assert_eq!(d.row(), 21);
        assert_eq!(d.cost(), -420);
    }

    #[test]
    fn test_decide_holds_into_empty_slot_then_bans() {
        let mut solver = sequential();
        let grid = Grid::new();
        let t = Piece::new(Shape::T);
        let d = solver.decide(&grid, Some(&t), None).expect("valid");
        // empty hold scores row = grid height, cheaper than any landing row
        assert!(d.hold_used());
        assert!(d.piece().is_none());
        assert!(solver.ban_hold());

        let outcomes = solver
            .enumerate_outcomes(&grid, Some(&t), Some(&t))
            .expect("valid");
        assert!(outcomes.iter().all(|o| !o.hold_used));

        let d = solver.decide(&grid, Some(&t), Some(&t)).expect("valid");
        assert!(!d.hold_used());
        assert!(!solver.ban_hold());
    }

    #[test]
    fn test_decide_without_piece_sets_ban() {
        let mut solver = sequential();
        let d = solver.decide(&Grid::new(), None, None).expect("valid");
        assert!(!d.is_placement());
        assert!(!d.hold_used());
        assert!(solver.ban_hold());
    }

    #[test]
    fn test_grid_too_narrow_for_any_placement() {
        let mut solver = sequential();
        solver.set_ban_hold(true);
        let grid = Grid::with_size(4, 1).expect("non-zero size");
        let d = solver
            .decide(&grid, Some(&Piece::new(Shape::O)), None)
            .expect("no candidates is not an error");
        assert!(!d.is_placement());
    }
}
