use std::collections::HashSet;

use rand::Rng;

use crate::{ConfigurationError, Coordinate, GridEnvironment, environment};

/// Places obstacles uniformly at random on an empty grid.
///
/// Sampling is by rejection: random cells are drawn until `obstacle_count` distinct cells
/// that are neither the start nor the end have been collected. The grid capacity is
/// checked up front, so the loop always terminates.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use shiproute_grid::{Coordinate, ObstacleSampler};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let env = ObstacleSampler::new(20, 30).sample_environment(&mut rng)?;
/// assert_eq!(env.obstacles().len(), 30);
/// assert_eq!(env.start(), Coordinate::new(0, 0));
/// assert_eq!(env.end(), Coordinate::new(19, 19));
/// # Ok::<(), shiproute_grid::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleSampler {
    grid_size: u32,
    obstacle_count: usize,
    start: Coordinate,
    end: Coordinate,
}

impl Default for ObstacleSampler {
    fn default() -> Self {
        Self::new(
            GridEnvironment::DEFAULT_SIZE,
            GridEnvironment::DEFAULT_OBSTACLE_COUNT,
        )
    }
}

impl ObstacleSampler {
    /// Creates a sampler routing from the top-left corner to the bottom-right corner.
    #[must_use]
    pub fn new(grid_size: u32, obstacle_count: usize) -> Self {
        Self {
            grid_size,
            obstacle_count,
            start: Coordinate::new(0, 0),
            end: GridEnvironment::far_corner(grid_size),
        }
    }

    /// Overrides the start and end cells.
    #[must_use]
    pub fn with_endpoints(self, start: Coordinate, end: Coordinate) -> Self {
        Self { start, end, ..self }
    }

    /// Draws a set of distinct obstacle cells, excluding start and end.
    pub fn sample<R>(&self, rng: &mut R) -> Result<HashSet<Coordinate>, ConfigurationError>
    where
        R: Rng + ?Sized,
    {
        environment::check_capacity(self.grid_size, self.obstacle_count)?;
        let upper = i32::try_from(self.grid_size)
            .map_err(|_| ConfigurationError::GridTooLarge(self.grid_size))?;

        let mut obstacles = HashSet::with_capacity(self.obstacle_count);
        let mut draws = 0_usize;
        while obstacles.len() < self.obstacle_count {
            let candidate = Coordinate::new(rng.random_range(0..upper), rng.random_range(0..upper));
            draws += 1;
            if candidate != self.start && candidate != self.end {
                obstacles.insert(candidate);
            }
        }
        log::trace!(
            "sampled {} obstacles in {draws} draws on a {}x{} grid",
            obstacles.len(),
            self.grid_size,
            self.grid_size
        );
        Ok(obstacles)
    }

    /// Samples obstacles and builds the resulting environment.
    pub fn sample_environment<R>(&self, rng: &mut R) -> Result<GridEnvironment, ConfigurationError>
    where
        R: Rng + ?Sized,
    {
        // endpoints first, so a bad end cell is reported before any draws
        GridEnvironment::new(self.grid_size, self.start, self.end, [])?;
        let obstacles = self.sample(rng)?;
        GridEnvironment::new(self.grid_size, self.start, self.end, obstacles)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_sample_excludes_endpoints_and_has_exact_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        let sampler = ObstacleSampler::new(5, 20);
        for _ in 0..20 {
            let obstacles = sampler.sample(&mut rng).unwrap();
            assert_eq!(obstacles.len(), 20);
            assert!(!obstacles.contains(&Coordinate::new(0, 0)));
            assert!(!obstacles.contains(&Coordinate::new(4, 4)));
        }
    }

    #[test]
    fn test_fills_every_free_cell() {
        // Every free cell except start and end becomes an obstacle.
        let mut rng = Pcg32::seed_from_u64(2);
        let env = ObstacleSampler::new(3, 7)
            .sample_environment(&mut rng)
            .unwrap();
        assert_eq!(env.obstacles().len(), 7);
    }

    #[test]
    fn test_rejects_overfull_grid() {
        let mut rng = Pcg32::seed_from_u64(3);
        let err = ObstacleSampler::new(3, 8).sample(&mut rng).unwrap_err();
        assert!(err.is_grid_too_small());
    }

    #[test]
    fn test_rejects_unaddressable_grid() {
        let mut rng = Pcg32::seed_from_u64(5);
        let err = ObstacleSampler::new(u32::MAX, 3).sample(&mut rng).unwrap_err();
        assert_eq!(err, ConfigurationError::GridTooLarge(u32::MAX));
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let sampler = ObstacleSampler::default();
        let a = sampler.sample(&mut Pcg32::seed_from_u64(9)).unwrap();
        let b = sampler.sample(&mut Pcg32::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_endpoints() {
        let mut rng = Pcg32::seed_from_u64(4);
        let env = ObstacleSampler::new(6, 10)
            .with_endpoints(Coordinate::new(5, 0), Coordinate::new(0, 5))
            .sample_environment(&mut rng)
            .unwrap();
        assert_eq!(env.start(), Coordinate::new(5, 0));
        assert!(!env.is_obstacle(env.start()));
        assert!(!env.is_obstacle(env.end()));
    }
}
