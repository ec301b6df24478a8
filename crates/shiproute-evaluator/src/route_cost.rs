//! Route cost model: Euclidean length plus a penalty for stalled steps.
//!
//! # Formula
//!
//! ```text
//! distance = Σ |p[i+1] - p[i]|                       (all consecutive points)
//! penalized = #{ i in 1..=len-2 : p[i] = p[i-1] or p[i] = p[i+1] }
//! cost     = distance + stall_penalty × penalized   (stall_penalty = 500 by default)
//! fitness  = 1 / cost
//! ```
//!
//! The distance includes the final jump to the end cell that the decoder appends, so a
//! route that stops far from the end pays for the straight-line gap.
//!
//! # Known Quirk: Double Counting
//!
//! The penalty counts *points*, not stalls. A single blocked move produces two equal
//! consecutive points `p[i-1] = p[i]`; the point `p[i]` is penalized for equalling its
//! predecessor, and `p[i-1]` (when it is interior) is penalized for equalling its
//! successor. One stall therefore usually costs `2 × stall_penalty`, while a run of `k`
//! consecutive stalls costs `(k + 1) × stall_penalty`. This shape is kept as is; changing
//! it would change which routes the search prefers.
//!
//! Since start and end always differ, `distance > 0` and the fitness is always positive
//! and finite.

use serde::{Deserialize, Serialize};
use shiproute_grid::DecodedPath;

use crate::fitness_evaluator::FitnessEvaluator;

/// Cost breakdown of a single decoded route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteCost {
    /// Euclidean length of the route, including the appended jump to the end.
    pub distance: f64,
    /// Interior points equal to a neighbor.
    pub penalized_points: usize,
    /// `penalized_points × stall_penalty`.
    pub penalty: f64,
}

impl RouteCost {
    /// Measures a decoded route with the given per-point stall penalty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn measure(path: &DecodedPath, stall_penalty: f64) -> Self {
        let points = path.points();
        let distance = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        let penalized_points = points
            .windows(3)
            .filter(|w| w[1] == w[0] || w[1] == w[2])
            .count();
        Self {
            distance,
            penalized_points,
            penalty: penalized_points as f64 * stall_penalty,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.distance + self.penalty
    }

    /// Inverse of the total cost.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        1.0 / self.total()
    }
}

/// Default [`FitnessEvaluator`]: inverse of distance plus stall penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteCostEvaluator {
    stall_penalty: f64,
}

impl Default for RouteCostEvaluator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STALL_PENALTY)
    }
}

impl RouteCostEvaluator {
    pub const DEFAULT_STALL_PENALTY: f64 = 500.0;

    /// Creates an evaluator charging `stall_penalty` per penalized point.
    ///
    /// # Panics
    ///
    /// Panics if `stall_penalty` is negative or not finite.
    #[must_use]
    pub fn new(stall_penalty: f64) -> Self {
        assert!(
            stall_penalty.is_finite() && stall_penalty >= 0.0,
            "stall penalty must be a non-negative finite number"
        );
        Self { stall_penalty }
    }

    #[must_use]
    pub fn stall_penalty(&self) -> f64 {
        self.stall_penalty
    }

    #[must_use]
    pub fn cost(&self, path: &DecodedPath) -> RouteCost {
        RouteCost::measure(path, self.stall_penalty)
    }
}

impl FitnessEvaluator for RouteCostEvaluator {
    fn fitness(&self, path: &DecodedPath) -> f64 {
        self.cost(path).fitness()
    }
}
