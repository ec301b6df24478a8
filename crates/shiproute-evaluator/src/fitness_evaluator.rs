use std::fmt;

use shiproute_grid::{DecodedPath, GridEnvironment, MoveDirective, PathDecoder};

/// Scores decoded routes for the genetic algorithm.
///
/// Implementations must return a positive, finite value where higher means a better
/// route. Evaluation must not depend on anything but the path, so individuals can be
/// scored in any order and on any thread.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    /// Computes the fitness of a decoded route.
    fn fitness(&self, path: &DecodedPath) -> f64;

    /// Decodes `moves` on `env` and scores the resulting route.
    fn decode_and_evaluate(&self, env: &GridEnvironment, moves: &[MoveDirective]) -> f64 {
        self.fitness(&PathDecoder::new(env).decode(moves))
    }
}

impl<E> FitnessEvaluator for &E
where
    E: FitnessEvaluator + ?Sized,
{
    fn fitness(&self, path: &DecodedPath) -> f64 {
        (**self).fitness(path)
    }
}

impl<E> FitnessEvaluator for Box<E>
where
    E: FitnessEvaluator + ?Sized,
{
    fn fitness(&self, path: &DecodedPath) -> f64 {
        (**self).fitness(path)
    }
}
