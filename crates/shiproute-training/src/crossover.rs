//! Single-point crossover.
//!
//! With probability `rate` a cut index `k` is drawn uniformly from `1..len` and the two
//! parents exchange their suffixes:
//!
//! ```text
//! parent A: a0 a1 a2 | a3 a4        child A: a0 a1 a2 b3 b4
//! parent B: b0 b1 b2 | b3 b4   →    child B: b0 b1 b2 a3 a4
//! ```
//!
//! Otherwise both children are copies of their parents. Parents are only read.

use rand::Rng;

use crate::{genotype::Genotype, population::Individual};

/// Default probability of crossing a selected pair.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.3;

/// Crosses two genotypes with probability `rate`.
///
/// Returns `None` when the pair is not crossed, either because the draw said so or
/// because the genotypes are too short to be split.
fn try_cross<R>(a: &Genotype, b: &Genotype, rate: f64, rng: &mut R) -> Option<(Genotype, Genotype)>
where
    R: Rng + ?Sized,
{
    assert_eq!(a.len(), b.len());
    if !rng.random_bool(rate) || a.len() < 2 {
        return None;
    }
    let cut = rng.random_range(1..a.len());
    log::trace!("crossover cut at {cut}");
    Some(swap_suffixes(a, b, cut))
}

/// Builds the two children of a cut at `cut`.
///
/// # Panics
///
/// Panics if the parents have different lengths or `cut` is out of range.
#[must_use]
pub fn swap_suffixes(a: &Genotype, b: &Genotype, cut: usize) -> (Genotype, Genotype) {
    assert_eq!(a.len(), b.len());
    let (a_head, a_tail) = a.genes().split_at(cut);
    let (b_head, b_tail) = b.genes().split_at(cut);
    let child_a = a_head.iter().chain(b_tail).copied().collect();
    let child_b = b_head.iter().chain(a_tail).copied().collect();
    (child_a, child_b)
}

/// Performs single-point crossover on two genotypes.
///
/// # Panics
///
/// Panics if the parents have different lengths or `rate` is not within `[0, 1]`.
pub fn single_point<R>(a: &Genotype, b: &Genotype, rate: f64, rng: &mut R) -> (Genotype, Genotype)
where
    R: Rng + ?Sized,
{
    try_cross(a, b, rate, rng).unwrap_or_else(|| (a.clone(), b.clone()))
}

/// Performs single-point crossover on two individuals.
///
/// Uncrossed children are clones of their parents and keep the cached fitness; crossed
/// children start unevaluated.
pub(crate) fn cross_individuals<R>(
    a: &Individual,
    b: &Individual,
    rate: f64,
    rng: &mut R,
) -> (Individual, Individual)
where
    R: Rng + ?Sized,
{
    match try_cross(a.genotype(), b.genotype(), rate, rng) {
        Some((child_a, child_b)) => (Individual::new(child_a), Individual::new(child_b)),
        None => (a.clone(), b.clone()),
    }
}
