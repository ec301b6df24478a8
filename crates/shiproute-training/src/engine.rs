//! The generation loop.
//!
//! [`EvolutionEngine`] is a small state machine:
//!
//! ```text
//! Initializing ──► Evaluating ──► Evolving
//!                     ▲   │          │
//!                     │   │          │
//!                     └───┼──────────┘
//!                         ▼
//!                    Terminated
//! ```
//!
//! - **Initializing** - builds `population_size` random genotypes
//! - **Evaluating** - scores every individual without a cached fitness, updates the
//!   best-ever record and the per-generation summary, then either terminates (the
//!   generation limit is reached) or moves on to evolving
//! - **Evolving** - fills a new population of the same size through selection,
//!   crossover and mutation; each pass completes one generation
//!
//! The initial random population is generation 0. A run with `generation_limit = N`
//! performs `N` evolving passes and evaluates `N + 1` populations.
//! - **Terminated** - the best individual ever seen is available
//!
//! The reported result is the best individual over the whole run, not the best of the
//! final generation; no individual is copied forward unchanged on purpose.

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use shiproute_evaluator::fitness_evaluator::FitnessEvaluator;
use shiproute_grid::{ConfigurationError, DecodedPath, GridEnvironment, PathDecoder};
use shiproute_stats::descriptive::DescriptiveStats;

use crate::{
    config::EvolutionConfig,
    crossover,
    genotype::Genotype,
    population::{Individual, Population},
};

/// Where the engine is in its generation loop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::IsVariant,
)]
pub enum EnginePhase {
    Initializing,
    Evaluating,
    Evolving,
    Terminated,
}

/// The best individual seen so far in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestIndividual {
    pub genotype: Genotype,
    pub fitness: f64,
    /// Generation in which this genotype was first evaluated as the best (0 for the
    /// initial population).
    pub generation: usize,
}

impl BestIndividual {
    #[must_use]
    pub fn decoded_path(&self, env: &GridEnvironment) -> DecodedPath {
        PathDecoder::new(env).decode(self.genotype.genes())
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation number; generation 0 is the initial random population.
    pub generation: usize,
    /// Individuals that had to be scored (the rest reused a cached fitness).
    pub evaluated: usize,
    /// Distribution of fitness over the whole population.
    pub fitness: DescriptiveStats,
    /// Best fitness seen up to and including this generation.
    pub best_ever_fitness: f64,
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub best: BestIndividual,
    pub generations: Vec<GenerationSummary>,
}

impl EvolutionOutcome {
    #[must_use]
    pub fn decoded_path(&self, env: &GridEnvironment) -> DecodedPath {
        self.best.decoded_path(env)
    }
}

/// Evolves a population of route genotypes on a fixed environment.
///
/// The engine owns the run's only random number generator; seeding it makes the whole
/// run reproducible (fitness evaluation itself never draws random numbers).
///
/// # Example
///
/// ```
/// use shiproute_evaluator::route_cost::RouteCostEvaluator;
/// use shiproute_grid::{Coordinate, GridEnvironment};
/// use shiproute_training::{config::EvolutionConfig, engine::EvolutionEngine};
///
/// let env = GridEnvironment::new(5, Coordinate::new(0, 0), Coordinate::new(4, 4), [])?;
/// let config = EvolutionConfig {
///     genotype_length: 20,
///     population_size: 30,
///     generation_limit: 10,
///     ..Default::default()
/// };
/// let outcome = EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 7)?.run();
/// assert_eq!(outcome.generations.len(), 11);
/// assert_eq!(outcome.best.genotype.len(), 20);
/// # Ok::<(), shiproute_grid::ConfigurationError>(())
/// ```
#[derive(Debug)]
pub struct EvolutionEngine<'a, E, R> {
    env: &'a GridEnvironment,
    evaluator: E,
    config: EvolutionConfig,
    rng: R,
    phase: EnginePhase,
    generation: usize,
    population: Population,
    best: Option<BestIndividual>,
    history: Vec<GenerationSummary>,
}

impl<'a, E> EvolutionEngine<'a, E, Pcg32>
where
    E: FitnessEvaluator,
{
    /// Creates an engine driven by a [`Pcg32`] generator seeded with `seed`.
    pub fn with_seed(
        env: &'a GridEnvironment,
        evaluator: E,
        config: EvolutionConfig,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        Self::new(env, evaluator, config, Pcg32::seed_from_u64(seed))
    }
}

impl<'a, E, R> EvolutionEngine<'a, E, R>
where
    E: FitnessEvaluator,
    R: Rng,
{
    /// Creates an engine in the `Initializing` phase.
    ///
    /// Fails if the configuration is out of range; no random numbers are drawn in that
    /// case.
    pub fn new(
        env: &'a GridEnvironment,
        evaluator: E,
        config: EvolutionConfig,
        rng: R,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            env,
            evaluator,
            config,
            rng,
            phase: EnginePhase::Initializing,
            generation: 0,
            population: Population::from_individuals(Vec::new()),
            best: None,
            history: Vec::with_capacity(config.generation_limit + 1),
        })
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Number of completed generations (evolving passes) so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best individual seen so far, if any generation has been evaluated.
    #[must_use]
    pub fn best(&self) -> Option<&BestIndividual> {
        self.best.as_ref()
    }

    /// Summaries of all evaluated generations, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    /// Performs one state transition and returns the new phase.
    ///
    /// Stepping a terminated engine does nothing.
    pub fn step(&mut self) -> EnginePhase {
        self.phase = match self.phase {
            EnginePhase::Initializing => {
                self.initialize();
                EnginePhase::Evaluating
            }
            EnginePhase::Evaluating => {
                self.evaluate();
                if self.generation >= self.config.generation_limit {
                    EnginePhase::Terminated
                } else {
                    EnginePhase::Evolving
                }
            }
            EnginePhase::Evolving => {
                self.evolve();
                self.generation += 1;
                EnginePhase::Evaluating
            }
            EnginePhase::Terminated => EnginePhase::Terminated,
        };
        self.phase
    }

    /// Runs the remaining generations and returns the outcome.
    #[must_use]
    pub fn run(mut self) -> EvolutionOutcome {
        while !self.step().is_terminated() {}
        self.into_outcome()
            .expect("a terminated engine has evaluated at least one generation")
    }

    /// Returns the outcome of a terminated engine, or `None` if the run is not finished.
    #[must_use]
    pub fn into_outcome(self) -> Option<EvolutionOutcome> {
        if !self.phase.is_terminated() {
            return None;
        }
        Some(EvolutionOutcome {
            best: self.best?,
            generations: self.history,
        })
    }

    fn initialize(&mut self) {
        self.population = Population::random(
            &mut self.rng,
            self.config.population_size,
            self.config.genotype_length,
        );
        log::debug!(
            "initialized {} random genotypes of {} moves",
            self.config.population_size,
            self.config.genotype_length
        );
    }

    fn evaluate(&mut self) {
        let evaluated = self.population.evaluate_fitness(self.env, &self.evaluator);

        if let Some(candidate) = self.population.best() {
            let fitness = candidate.fitness().unwrap_or(f64::NEG_INFINITY);
            if self.best.as_ref().is_none_or(|best| fitness > best.fitness) {
                self.best = Some(BestIndividual {
                    genotype: candidate.genotype().clone(),
                    fitness,
                    generation: self.generation,
                });
            }
        }

        let best_ever_fitness = self.best.as_ref().map_or(f64::NEG_INFINITY, |b| b.fitness);
        if let Some(fitness) = self.population.fitness_stats() {
            log::debug!(
                "generation {}: evaluated {evaluated}, fitness min {:.6} mean {:.6} max {:.6}, best ever {best_ever_fitness:.6}",
                self.generation,
                fitness.min,
                fitness.mean,
                fitness.max,
            );
            self.history.push(GenerationSummary {
                generation: self.generation,
                evaluated,
                fitness,
                best_ever_fitness,
            });
        }

        if self.generation >= self.config.generation_limit {
            log::info!(
                "terminated after {} generations, best fitness {best_ever_fitness:.6}",
                self.generation
            );
        }
    }

    fn evolve(&mut self) {
        let size = self.population.len();
        let EvolutionConfig {
            mutation_rate,
            crossover_rate,
            selector,
            ..
        } = self.config;
        let parents = self.population.individuals();
        let mut next = Vec::with_capacity(size);

        while next.len() < size {
            let parent_a = selector.select(parents, &mut self.rng);
            if size - next.len() == 1 {
                // odd population: the last slot gets a mutated copy without a partner
                let mut child = parent_a.clone();
                child.mutate(mutation_rate, &mut self.rng);
                next.push(child);
                break;
            }
            let parent_b = selector.select(parents, &mut self.rng);
            let (mut child_a, mut child_b) =
                crossover::cross_individuals(parent_a, parent_b, crossover_rate, &mut self.rng);
            child_a.mutate(mutation_rate, &mut self.rng);
            child_b.mutate(mutation_rate, &mut self.rng);
            next.push(child_a);
            next.push(child_b);
        }

        self.population = Population::from_individuals(next);
    }
}

/// Convenience wrapper: builds an engine and runs it to completion.
pub fn evolve<E, R>(
    env: &GridEnvironment,
    evaluator: E,
    config: EvolutionConfig,
    rng: R,
) -> Result<EvolutionOutcome, ConfigurationError>
where
    E: FitnessEvaluator,
    R: Rng,
{
    Ok(EvolutionEngine::new(env, evaluator, config, rng)?.run())
}

#[cfg(test)]
mod tests {
    use shiproute_evaluator::route_cost::RouteCostEvaluator;
    use shiproute_grid::{Coordinate, ObstacleSampler};

    use super::*;
    use crate::selection::Selector;

    fn open_env() -> GridEnvironment {
        GridEnvironment::new(5, Coordinate::new(0, 0), Coordinate::new(4, 4), []).unwrap()
    }

    fn small_config() -> EvolutionConfig {
        EvolutionConfig {
            genotype_length: 20,
            population_size: 50,
            generation_limit: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_phase_transitions() {
        let env = open_env();
        let config = EvolutionConfig {
            generation_limit: 2,
            ..small_config()
        };
        let mut engine =
            EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 1).unwrap();
        assert_eq!(engine.phase(), EnginePhase::Initializing);
        assert!(engine.population().is_empty());

        assert_eq!(engine.step(), EnginePhase::Evaluating);
        assert_eq!(engine.population().len(), 50);
        assert!(engine.best().is_none());

        assert_eq!(engine.step(), EnginePhase::Evolving);
        assert_eq!(engine.generation(), 0);
        assert!(engine.best().is_some());

        assert_eq!(engine.step(), EnginePhase::Evaluating);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.step(), EnginePhase::Evolving);
        assert_eq!(engine.step(), EnginePhase::Evaluating);
        assert_eq!(engine.step(), EnginePhase::Terminated);
        assert_eq!(engine.generation(), 2);
        assert_eq!(engine.step(), EnginePhase::Terminated);

        let generations = engine.history().iter().map(|g| g.generation).collect::<Vec<_>>();
        assert_eq!(generations, vec![0, 1, 2]);
    }

    #[test]
    fn test_limit_counts_evolving_passes() {
        let env = open_env();
        for (generation_limit, population_size) in [(1, 10), (2, 10), (100, 10)] {
            let config = EvolutionConfig {
                generation_limit,
                population_size,
                ..small_config()
            };
            let mut engine =
                EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 2)
                    .unwrap();
            let mut passes = 0;
            while !engine.phase().is_terminated() {
                if engine.phase().is_evolving() {
                    passes += 1;
                }
                engine.step();
            }
            assert_eq!(passes, generation_limit);
            assert_eq!(engine.generation(), generation_limit);
            assert_eq!(engine.history().len(), generation_limit + 1);
        }
    }

    #[test]
    fn test_default_limit_runs_one_hundred_generations() {
        let env = open_env();
        let config = EvolutionConfig {
            genotype_length: 10,
            population_size: 10,
            ..Default::default()
        };
        assert_eq!(config.generation_limit, 100);
        let outcome =
            EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 3)
                .unwrap()
                .run();
        assert_eq!(outcome.generations.len(), 101);
        assert_eq!(outcome.generations.last().unwrap().generation, 100);
    }

    #[test]
    fn test_invalid_config_fails_at_initialization() {
        let env = open_env();
        let config = EvolutionConfig {
            population_size: 1,
            ..small_config()
        };
        let err = EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 0)
            .unwrap_err();
        assert!(err.is_size_too_small());
    }

    #[test]
    fn test_unfinished_engine_has_no_outcome() {
        let env = open_env();
        let mut engine =
            EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), small_config(), 0)
                .unwrap();
        engine.step();
        engine.step();
        assert!(engine.into_outcome().is_none());
    }

    #[test]
    fn test_zero_generations_report_initial_best() {
        let env = open_env();
        let evaluator = RouteCostEvaluator::default();
        let mut engine = EvolutionEngine::with_seed(&env, evaluator, small_config(), 5).unwrap();
        engine.step();
        let initial = engine.population().clone();
        assert_eq!(engine.step(), EnginePhase::Evolving);
        assert_eq!(engine.generation(), 0);
        let best = engine.best().unwrap();

        let initial_best = initial
            .individuals()
            .iter()
            .map(|ind| evaluator.decode_and_evaluate(&env, ind.genotype().genes()))
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(best.fitness, initial_best);
        assert_eq!(best.generation, 0);
        assert!(
            initial
                .individuals()
                .iter()
                .any(|ind| *ind.genotype() == best.genotype)
        );
    }

    #[test]
    fn test_population_size_is_constant_including_odd() {
        let env = open_env();
        for population_size in [2, 7, 50] {
            let config = EvolutionConfig {
                population_size,
                generation_limit: 5,
                ..small_config()
            };
            let mut engine =
                EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 3)
                    .unwrap();
            while !engine.phase().is_terminated() {
                engine.step();
                if !engine.phase().is_initializing() {
                    assert_eq!(engine.population().len(), population_size);
                }
            }
        }
    }

    #[test]
    fn test_best_ever_is_monotonic() {
        let env = ObstacleSampler::new(10, 15)
            .sample_environment(&mut Pcg32::seed_from_u64(8))
            .unwrap();
        let config = EvolutionConfig {
            genotype_length: 40,
            population_size: 30,
            generation_limit: 30,
            ..Default::default()
        };
        let outcome =
            EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 8)
                .unwrap()
                .run();
        assert_eq!(outcome.generations.len(), 31);
        assert!(
            outcome
                .generations
                .windows(2)
                .all(|w| w[0].best_ever_fitness <= w[1].best_ever_fitness)
        );
        for summary in &outcome.generations {
            assert!(summary.fitness.max <= summary.best_ever_fitness);
        }
        let last = outcome.generations.last().unwrap();
        assert_eq!(last.best_ever_fitness, outcome.best.fitness);
        assert_eq!(
            RouteCostEvaluator::default().fitness(&outcome.decoded_path(&env)),
            outcome.best.fitness
        );
    }

    #[test]
    fn test_unaltered_offspring_reuse_cached_fitness() {
        let env = open_env();
        let config = EvolutionConfig {
            mutation_rate: 0.0,
            crossover_rate: 0.0,
            generation_limit: 3,
            ..small_config()
        };
        let outcome =
            EvolutionEngine::with_seed(&env, RouteCostEvaluator::default(), config, 4)
                .unwrap()
                .run();
        let evaluated = outcome
            .generations
            .iter()
            .map(|g| g.evaluated)
            .collect::<Vec<_>>();
        assert_eq!(evaluated, vec![50, 0, 0, 0]);
    }

    #[test]
    fn test_roulette_engine_runs() {
        let env = open_env();
        let config = EvolutionConfig {
            selector: Selector::Roulette,
            generation_limit: 10,
            ..small_config()
        };
        let outcome =
            evolve(&env, RouteCostEvaluator::default(), config, Pcg32::seed_from_u64(6)).unwrap();
        assert!(outcome.best.fitness > 0.0);
        assert_eq!(outcome.generations.len(), 11);
    }
}
