use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, Coordinate};

/// Immutable description of the world a route is searched in.
///
/// A square grid of `size × size` cells, a start and an end cell, and a set of impassable
/// obstacle cells. An environment is built once per run, before evolution starts, and
/// is only read afterwards; it is safe to share between evaluation threads.
///
/// # Invariants
///
/// Checked by [`GridEnvironment::new`]:
///
/// - `size ≥ 1` and `size² ≥ obstacles + 2`
/// - start and end are inside the grid and differ
/// - neither start nor end is an obstacle
/// - every obstacle is inside the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridEnvironmentRepr", into = "GridEnvironmentRepr")]
pub struct GridEnvironment {
    size: u32,
    start: Coordinate,
    end: Coordinate,
    obstacles: HashSet<Coordinate>,
}

impl GridEnvironment {
    /// Default edge length of the grid.
    pub const DEFAULT_SIZE: u32 = 20;
    /// Default number of obstacles placed by [`ObstacleSampler`](crate::ObstacleSampler).
    pub const DEFAULT_OBSTACLE_COUNT: usize = 30;

    /// Creates an environment, validating all invariants.
    ///
    /// Duplicate obstacles collapse into one.
    pub fn new<I>(
        size: u32,
        start: Coordinate,
        end: Coordinate,
        obstacles: I,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let obstacles = obstacles.into_iter().collect::<HashSet<_>>();
        check_capacity(size, obstacles.len())?;

        let this = Self {
            size,
            start,
            end,
            obstacles,
        };
        for (role, coordinate) in [("start", start), ("end", end)] {
            if !this.in_bounds(coordinate) {
                return Err(ConfigurationError::OutOfBounds {
                    role,
                    coordinate,
                    grid_size: size,
                });
            }
        }
        if start == end {
            return Err(ConfigurationError::StartEqualsEnd(start));
        }
        for (role, coordinate) in [("start", start), ("end", end)] {
            if this.obstacles.contains(&coordinate) {
                return Err(ConfigurationError::BlockedEndpoint { role, coordinate });
            }
        }
        if let Some(&coordinate) = this.obstacles.iter().find(|c| !this.in_bounds(**c)) {
            return Err(ConfigurationError::OutOfBounds {
                role: "obstacle",
                coordinate,
                grid_size: size,
            });
        }
        Ok(this)
    }

    /// Returns the corner cell `(size - 1, size - 1)`, the default end cell.
    #[must_use]
    pub fn far_corner(size: u32) -> Coordinate {
        let last = i32::try_from(size.saturating_sub(1)).unwrap_or(i32::MAX);
        Coordinate::new(last, last)
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn start(&self) -> Coordinate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Coordinate {
        self.end
    }

    #[must_use]
    pub fn obstacles(&self) -> &HashSet<Coordinate> {
        &self.obstacles
    }

    /// Returns `true` if `c` lies within `0..size` on both axes.
    #[must_use]
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        let size = i64::from(self.size);
        (0..size).contains(&i64::from(c.x)) && (0..size).contains(&i64::from(c.y))
    }

    #[must_use]
    pub fn is_obstacle(&self, c: Coordinate) -> bool {
        self.obstacles.contains(&c)
    }

    /// Returns `true` if `c` is inside the grid and not an obstacle.
    #[must_use]
    pub fn is_valid(&self, c: Coordinate) -> bool {
        self.in_bounds(c) && !self.is_obstacle(c)
    }
}

/// Fails if a `size × size` grid cannot hold `obstacle_count` obstacles plus start and end,
/// or if its cells cannot all be addressed by a [`Coordinate`].
pub(crate) fn check_capacity(size: u32, obstacle_count: usize) -> Result<(), ConfigurationError> {
    if size == 0 {
        return Err(ConfigurationError::EmptyGrid);
    }
    if i32::try_from(size).is_err() {
        return Err(ConfigurationError::GridTooLarge(size));
    }
    let cells = u64::from(size) * u64::from(size);
    let needed = u64::try_from(obstacle_count)
        .unwrap_or(u64::MAX)
        .saturating_add(2);
    if cells < needed {
        return Err(ConfigurationError::GridTooSmall {
            grid_size: size,
            obstacle_count,
        });
    }
    Ok(())
}

// Serialized form keeps obstacles sorted so that saved reports are stable.
#[derive(Serialize, Deserialize)]
struct GridEnvironmentRepr {
    size: u32,
    start: Coordinate,
    end: Coordinate,
    obstacles: Vec<Coordinate>,
}

impl From<GridEnvironment> for GridEnvironmentRepr {
    fn from(env: GridEnvironment) -> Self {
        let mut obstacles = env.obstacles.into_iter().collect::<Vec<_>>();
        obstacles.sort_unstable();
        Self {
            size: env.size,
            start: env.start,
            end: env.end,
            obstacles,
        }
    }
}

impl TryFrom<GridEnvironmentRepr> for GridEnvironment {
    type Error = ConfigurationError;

    fn try_from(repr: GridEnvironmentRepr) -> Result<Self, Self::Error> {
        Self::new(repr.size, repr.start, repr.end, repr.obstacles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_is_valid_respects_bounds_and_obstacles() {
        let env = GridEnvironment::new(4, c(0, 0), c(3, 3), [c(1, 1), c(2, 0)]).unwrap();
        assert!(env.is_valid(c(0, 0)));
        assert!(env.is_valid(c(3, 3)));
        assert!(env.is_valid(c(0, 3)));
        assert!(!env.is_valid(c(1, 1)));
        assert!(!env.is_valid(c(2, 0)));
        assert!(!env.is_valid(c(-1, 0)));
        assert!(!env.is_valid(c(0, -1)));
        assert!(!env.is_valid(c(4, 0)));
        assert!(!env.is_valid(c(0, 4)));
    }

    #[test]
    fn test_grid_too_small() {
        // 2x2 grid has 4 cells: room for at most 2 obstacles
        assert!(GridEnvironment::new(2, c(0, 0), c(1, 1), [c(1, 0), c(0, 1)]).is_ok());
        assert_eq!(
            check_capacity(2, 3),
            Err(ConfigurationError::GridTooSmall {
                grid_size: 2,
                obstacle_count: 3
            })
        );
        assert_eq!(check_capacity(0, 0), Err(ConfigurationError::EmptyGrid));
    }

    #[test]
    fn test_rejects_invalid_endpoints() {
        let err = GridEnvironment::new(3, c(0, 0), c(0, 0), []).unwrap_err();
        assert!(err.is_start_equals_end());

        let err = GridEnvironment::new(3, c(0, 0), c(3, 0), []).unwrap_err();
        assert!(err.is_out_of_bounds());

        let err = GridEnvironment::new(3, c(0, 0), c(2, 2), [c(2, 2)]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::BlockedEndpoint {
                role: "end",
                coordinate: c(2, 2)
            }
        );

        let err = GridEnvironment::new(3, c(0, 0), c(2, 2), [c(5, 1)]).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_duplicate_obstacles_collapse() {
        let env = GridEnvironment::new(3, c(0, 0), c(2, 2), [c(1, 1), c(1, 1)]).unwrap();
        assert_eq!(env.obstacles().len(), 1);
    }

    #[test]
    fn test_grid_too_large() {
        let too_large = u32::try_from(i32::MAX).unwrap() + 1;
        let err = GridEnvironment::new(too_large, c(0, 0), c(1, 1), []).unwrap_err();
        assert_eq!(err, ConfigurationError::GridTooLarge(too_large));
        assert!(check_capacity(u32::MAX, 0).unwrap_err().is_grid_too_large());
    }

    #[test]
    fn test_moves_off_largest_grid_edge_stall() {
        let size = u32::try_from(i32::MAX).unwrap();
        let corner = GridEnvironment::far_corner(size);
        assert_eq!(corner, c(i32::MAX - 1, i32::MAX - 1));
        let env = GridEnvironment::new(size, corner, c(0, 0), []).unwrap();
        let path = crate::PathDecoder::new(&env).decode(&[
            crate::MoveDirective::Right,
            crate::MoveDirective::Down,
            crate::MoveDirective::Left,
        ]);
        assert_eq!(
            path.points(),
            &[corner, corner, corner, c(i32::MAX - 2, i32::MAX - 1), c(0, 0)]
        );
    }

    #[test]
    fn test_far_corner() {
        assert_eq!(GridEnvironment::far_corner(20), c(19, 19));
        assert_eq!(GridEnvironment::far_corner(1), c(0, 0));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let env = GridEnvironment::new(4, c(0, 0), c(3, 3), [c(2, 1), c(1, 2)]).unwrap();
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains("\"obstacles\":[{\"x\":1,\"y\":2},{\"x\":2,\"y\":1}]"));
        let back: GridEnvironment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);

        let bad = r#"{"size":4,"start":{"x":0,"y":0},"end":{"x":0,"y":0},"obstacles":[]}"#;
        assert!(serde_json::from_str::<GridEnvironment>(bad).is_err());
    }
}
