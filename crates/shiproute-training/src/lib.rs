//! Evolutionary search for low-cost routes on an obstacle grid.
//!
//! A route is encoded as a fixed-length sequence of moves (a [`genotype::Genotype`]).
//! This crate evolves a population of such genotypes toward higher fitness, where
//! fitness comes from decoding the moves on a
//! [`GridEnvironment`](shiproute_grid::GridEnvironment) and scoring the resulting path
//! with a [`FitnessEvaluator`](shiproute_evaluator::fitness_evaluator::FitnessEvaluator).
//!
//! # How the Search Works
//!
//! 1. **Population** - Create `population_size` random genotypes
//! 2. **Evaluation** - Decode and score every genotype without a cached fitness
//! 3. **Selection** - Pick parents, biased toward higher fitness (tournament of 3 by default)
//! 4. **Crossover** - Cross selected pairs at a single random cut (rate 0.3)
//! 5. **Mutation** - Redraw each gene of each child with a small probability (rate 0.2)
//! 6. **Repeat** - Until the generation limit is reached
//!
//! The best individual ever evaluated is tracked across the run and reported at the end.
//!
//! # Architecture
//!
//! ```text
//! EvolutionEngine
//!     ↓ evolves
//! Population of Genotypes (move sequences)
//!     ↓ decoded by
//! PathDecoder (shiproute-grid)
//!     ↓ scored by
//! FitnessEvaluator (shiproute-evaluator)
//!     ↓ guides
//! Selection → Crossover → Mutation
//! ```
//!
//! # Modules
//!
//! - [`genotype`] - Move sequence encoding
//! - [`population`] - Individuals with cached fitness, and parallel evaluation
//! - [`selection`] - Tournament and roulette parent selection
//! - [`crossover`] - Single-point crossover
//! - [`mutation`] - Random-reset mutation
//! - [`config`] - Run parameters and their validation
//! - [`engine`] - The generation loop state machine
//!
//! # Example
//!
//! ```
//! use shiproute_evaluator::route_cost::RouteCostEvaluator;
//! use shiproute_grid::ObstacleSampler;
//! use shiproute_training::{config::EvolutionConfig, engine::EvolutionEngine};
//! use rand::SeedableRng as _;
//!
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(2024);
//! let env = ObstacleSampler::new(10, 10).sample_environment(&mut rng)?;
//!
//! let config = EvolutionConfig {
//!     genotype_length: 30,
//!     population_size: 40,
//!     generation_limit: 20,
//!     ..Default::default()
//! };
//! let engine = EvolutionEngine::new(&env, RouteCostEvaluator::default(), config, rng)?;
//! let outcome = engine.run();
//!
//! let path = outcome.decoded_path(&env);
//! assert_eq!(path.len(), 32);
//! assert!(outcome.best.fitness > 0.0);
//! # Ok::<(), shiproute_grid::ConfigurationError>(())
//! ```
//!
//! # Current Limitations
//!
//! - **No guarantee of a valid route**: The end cell is appended after the last move, so
//!   the best route may still end in a jump; the fitness only makes such routes expensive
//! - **Fixed genotype length**: Routes cannot grow or shrink during the search
//! - **Static environment**: Obstacles cannot change during a run

pub mod config;
pub mod crossover;
pub mod engine;
pub mod genotype;
pub mod mutation;
pub mod population;
pub mod selection;
