use serde::{Deserialize, Serialize};
use stackbot_eval::CostWeights;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub weights: CostWeights,
    /// Evaluate candidates on the rayon pool. Results are identical either way.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            parallel: true,
        }
    }
}

impl SolverConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }
}
