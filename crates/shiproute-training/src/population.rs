use std::{num::NonZeroUsize, thread};

use rand::Rng;
use shiproute_evaluator::fitness_evaluator::FitnessEvaluator;
use shiproute_grid::GridEnvironment;
use shiproute_stats::descriptive::DescriptiveStats;

use crate::{genotype::Genotype, mutation};

/// A single individual in the population: a genotype and its cached fitness.
///
/// The fitness is computed at most once per genotype content. Any change to the genes
/// made through [`Individual::mutate`] clears the cache, so a stale value can never be
/// read.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genotype: Genotype,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual.
    #[must_use]
    pub fn new(genotype: Genotype) -> Self {
        Self {
            genotype,
            fitness: None,
        }
    }

    /// Creates an unevaluated individual with `len` random moves.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(Genotype::random(rng, len))
    }

    #[must_use]
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// Returns the cached fitness, or `None` if the individual has not been evaluated
    /// since its genes last changed.
    #[must_use]
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Returns the cached fitness, computing it first if necessary.
    pub fn evaluate<E>(&mut self, env: &GridEnvironment, evaluator: &E) -> f64
    where
        E: FitnessEvaluator + ?Sized,
    {
        *self
            .fitness
            .get_or_insert_with(|| evaluator.decode_and_evaluate(env, self.genotype.genes()))
    }

    /// Applies random-reset mutation to the genes (see [`mutation::mutate`]).
    ///
    /// The cached fitness is dropped if any gene changed. Returns the number of changed
    /// genes.
    pub fn mutate<R>(&mut self, rate: f64, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let changed = mutation::mutate(self.genotype.genes_mut(), rate, rng);
        if changed > 0 {
            self.fitness = None;
        }
        changed
    }

    #[cfg(test)]
    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

/// A fixed-size, ordered collection of individuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of `count` random individuals with `genotype_length` moves.
    pub fn random<R>(rng: &mut R, count: usize, genotype_length: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(rng, genotype_length))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates every individual that has no cached fitness.
    ///
    /// Evaluation is split across scoped threads, one contiguous chunk per available
    /// core. All threads are joined before this returns, so the whole population is
    /// scored when selection reads it. Returns the number of individuals evaluated.
    pub fn evaluate_fitness<E>(&mut self, env: &GridEnvironment, evaluator: &E) -> usize
    where
        E: FitnessEvaluator + ?Sized,
    {
        let pending = self
            .individuals
            .iter()
            .filter(|ind| !ind.is_evaluated())
            .count();
        if pending == 0 {
            return 0;
        }

        let threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = self.individuals.len().div_ceil(threads);
        thread::scope(|s| {
            for chunk in self.individuals.chunks_mut(chunk_size) {
                s.spawn(move || {
                    for ind in chunk {
                        ind.evaluate(env, evaluator);
                    }
                });
            }
        });
        pending
    }

    /// Returns the evaluated individual with the highest fitness.
    ///
    /// Ties are resolved in favor of the earliest individual.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter_map(|ind| ind.fitness.map(|f| (ind, f)))
            .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
            .map(|(ind, _)| ind)
    }

    /// Computes descriptive statistics of the cached fitness values.
    ///
    /// Returns `None` if no individual has been evaluated.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.individuals.iter().filter_map(Individual::fitness))
    }
}
