//! Parent selection strategies.
//!
//! # Tournament Selection (default)
//!
//! Draw `size` distinct individuals at random and return the fittest. The default size
//! is 3: a moderate pressure that still lets weaker routes reproduce. When the
//! population is smaller than the tournament, every individual takes part.
//!
//! # Roulette Wheel Selection
//!
//! Pick an individual with probability proportional to its fitness. When every fitness
//! is equal, or the fitness total is not a positive finite number, the wheel degenerates
//! to a uniform draw instead of dividing by zero.
//!
//! Both strategies are called once per parent slot and never modify the population.
//! Individuals without a cached fitness rank below every evaluated individual.

use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
    seq::index,
};
use serde::{Deserialize, Serialize};
use shiproute_grid::ConfigurationError;

use crate::population::Individual;

/// How parents are chosen from the current population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selector {
    /// Best of `size` individuals drawn without replacement.
    Tournament { size: usize },
    /// Fitness-proportionate selection.
    Roulette,
}

impl Default for Selector {
    fn default() -> Self {
        Self::Tournament {
            size: Self::DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl Selector {
    pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

    pub(crate) fn validate(self) -> Result<(), ConfigurationError> {
        match self {
            Self::Tournament { size } if size < 1 => Err(ConfigurationError::SizeTooSmall {
                name: "tournament size",
                value: size,
                min: 1,
            }),
            Self::Tournament { .. } | Self::Roulette => Ok(()),
        }
    }

    /// Selects one parent.
    ///
    /// # Panics
    ///
    /// Panics if `individuals` is empty or the tournament size is zero.
    pub fn select<'a, R>(&self, individuals: &'a [Individual], rng: &mut R) -> &'a Individual
    where
        R: Rng + ?Sized,
    {
        assert!(!individuals.is_empty(), "cannot select from an empty population");
        match *self {
            Self::Tournament { size } => tournament_select(individuals, size, rng),
            Self::Roulette => roulette_select(individuals, rng),
        }
    }
}

fn score(ind: &Individual) -> f64 {
    ind.fitness().unwrap_or(f64::NEG_INFINITY)
}

fn tournament_select<'a, R>(
    individuals: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    let amount = tournament_size.min(individuals.len());
    let mut contestants = index::sample(rng, individuals.len(), amount).into_iter();
    let first = contestants
        .next()
        .expect("tournament has at least one contestant");
    let winner = contestants.fold(first, |best, i| {
        if score(&individuals[i]) > score(&individuals[best]) {
            i
        } else {
            best
        }
    });
    &individuals[winner]
}

fn roulette_select<'a, R>(individuals: &'a [Individual], rng: &mut R) -> &'a Individual
where
    R: Rng + ?Sized,
{
    let weights = individuals
        .iter()
        .map(|ind| ind.fitness().unwrap_or(0.0).max(0.0))
        .collect::<Vec<_>>();
    let total = weights.iter().sum::<f64>();
    let all_equal = weights.windows(2).all(|w| w[0] == w[1]);

    let index = if all_equal || !total.is_finite() || total <= 0.0 {
        rng.random_range(0..individuals.len())
    } else {
        match WeightedIndex::new(&weights) {
            Ok(wheel) => wheel.sample(rng),
            Err(_) => rng.random_range(0..individuals.len()),
        }
    };
    &individuals[index]
}
