//! Random-reset mutation.
//!
//! Every gene is considered independently: with probability `rate` it is replaced by a
//! direction drawn uniformly from all four moves. The draw may pick the gene's current
//! value, so the expected fraction of genes that actually change is `rate × 3/4`.

use rand::Rng;
use shiproute_grid::MoveDirective;

/// Default per-gene mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.2;

/// Redraws each gene with probability `rate`, in place.
///
/// Returns the number of genes whose value actually changed.
///
/// # Panics
///
/// Panics if `rate` is not within `[0, 1]`.
pub fn mutate<R>(genes: &mut [MoveDirective], rate: f64, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let mut changed = 0;
    for gene in genes {
        if rng.random_bool(rate) {
            let redrawn = rng.random();
            if redrawn != *gene {
                changed += 1;
            }
            *gene = redrawn;
        }
    }
    changed
}
