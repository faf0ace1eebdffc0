//! Stackbot eval crate - weighted cost of a candidate placement.

use serde::{Deserialize, Serialize};
use stackbot_core::{Grid, OutcomeFeatures};

/// Cost weights. A higher cost is worse.
///
/// Wells and gaps are penalised; the landing row carries a negative weight so
/// that placements resting lower in the stack come out cheaper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub wells: i32,
    pub gaps: i32,
    pub gap_depth: i32,
    pub row: i32,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            wells: 40,
            gaps: 20,
            gap_depth: 5,
            row: -20,
        }
    }
}

/// Measure the surface of `grid` after a piece landed at `row`.
pub fn measure(grid: &Grid, row: i32) -> OutcomeFeatures {
    OutcomeFeatures {
        gaps: grid.gap_count(),
        gap_depth: grid.gap_depth(),
        wells: grid.well_count(),
        row,
    }
}

pub fn cost(features: &OutcomeFeatures, weights: &CostWeights) -> i64 {
    features.wells as i64 * weights.wells as i64
        + features.gaps as i64 * weights.gaps as i64
        + features.gap_depth as i64 * weights.gap_depth as i64
        + features.row as i64 * weights.row as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackbot_core::{Piece, Shape};

    #[test]
    fn test_default_weights() {
        let w = CostWeights::default();
        assert!(w.wells > 0 && w.gaps > 0 && w.gap_depth > 0);
        assert!(w.row < 0);
    }

    #[test]
    fn test_cost_weighted_sum() {
        let f = OutcomeFeatures {
            gaps: 2,
            gap_depth: 3,
            wells: 1,
            row: 18,
        };
        // 40 + 40 + 15 - 360
        assert_eq!(cost(&f, &CostWeights::default()), -265);
    }

    #[test]
    fn test_lower_row_is_cheaper() {
        let w = CostWeights::default();
        let high = OutcomeFeatures {
            row: 10,
            ..OutcomeFeatures::default()
        };
        let low = OutcomeFeatures {
            row: 20,
            ..OutcomeFeatures::default()
        };
        assert!(cost(&low, &w) < cost(&high, &w));
    }

    #[test]
    fn test_large_features_do_not_wrap() {
        let f = OutcomeFeatures {
            gaps: 200,
            gap_depth: 0,
            wells: 0,
            row: 0,
        };
        assert_eq!(cost(&f, &CostWeights::default()), 4000);
    }

    #[test]
    fn test_measure_matches_grid() {
        let mut grid = Grid::new();
        let row = grid
            .drop(&Piece::with_rotation(Shape::T, 2), 0)
            .expect("fits");
        let f = measure(&grid, row);
        assert_eq!(f.row, 20);
        assert_eq!(f.gaps, 2);
        assert_eq!(f.gap_depth, 4);
        assert_eq!(f.wells, 0);
    }

    #[test]
    fn test_holes_in_one_column_cheaper_than_spread() {
        let weights = CostWeights::default();
        let stacked = Grid::with_stack(22, 10, "T.........\n..........\n..........")
            .expect("stack");
        let spread = Grid::with_stack(22, 10, "TT........\n..........").expect("stack");
        let a = cost(&measure(&stacked, 19), &weights);
        let b = cost(&measure(&spread, 19), &weights);
        assert_eq!(b - a, 5);
    }

    #[test]
    fn test_weights_from_partial_json() {
        let w: CostWeights = serde_json::from_str(r#"{"wells": 10}"#).expect("valid json");
        assert_eq!(w.wells, 10);
        assert_eq!(w.gaps, 20);
        assert_eq!(w.row, -20);
    }
}
