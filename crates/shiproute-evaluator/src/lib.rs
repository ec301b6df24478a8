//! Fitness evaluation for decoded routes.
//!
//! The evolutionary search treats route quality as an opaque scalar: this crate turns a
//! [`DecodedPath`](shiproute_grid::DecodedPath) into that scalar.
//!
//! - [`fitness_evaluator`] - The [`FitnessEvaluator`](fitness_evaluator::FitnessEvaluator)
//!   trait used by the training loop
//! - [`route_cost`] - Distance plus stall penalty cost model and its evaluator
//!
//! # Architecture
//!
//! ```text
//! Genotype (move directives)
//!     ↓ decoded by PathDecoder (shiproute-grid)
//! DecodedPath
//!     ↓ measured by RouteCost
//! Cost (distance + penalty)
//!     ↓ inverted by RouteCostEvaluator
//! Fitness (higher is better)
//! ```
//!
//! # Example
//!
//! ```
//! use shiproute_evaluator::{fitness_evaluator::FitnessEvaluator, route_cost::RouteCostEvaluator};
//! use shiproute_grid::{Coordinate, GridEnvironment, MoveDirective, PathDecoder};
//!
//! let env = GridEnvironment::new(2, Coordinate::new(0, 0), Coordinate::new(1, 1), [])?;
//! let path = PathDecoder::new(&env).decode(&[MoveDirective::Right, MoveDirective::Down]);
//!
//! // (0,0) → (1,0) → (1,1) → (1,1): distance 2, and the final point repeats (1,1)
//! let fitness = RouteCostEvaluator::default().fitness(&path);
//! assert!((fitness - 1.0 / 502.0).abs() < 1e-12);
//! # Ok::<(), shiproute_grid::ConfigurationError>(())
//! ```

pub mod fitness_evaluator;
pub mod route_cost;
