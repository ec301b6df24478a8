use std::{collections::HashSet, fmt};

use crate::{Coordinate, DecodedPath, GridEnvironment};

/// What a single grid cell shows in a [`RouteMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapCell {
    #[default]
    Empty,
    Obstacle,
    Route,
    Start,
    End,
}

impl MapCell {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Obstacle => '#',
            Self::Route => '*',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }
}

/// Plain-text picture of an environment, optionally with a route drawn on it.
///
/// Rows are printed top to bottom (increasing `y`), one character per cell. Only cells
/// actually walked are marked as route; the appended jump to the end is not drawn.
///
/// ```
/// use shiproute_grid::{Coordinate, GridEnvironment, MoveDirective, PathDecoder, RouteMap};
///
/// let env = GridEnvironment::new(3, Coordinate::new(0, 0), Coordinate::new(2, 2), [Coordinate::new(1, 1)])?;
/// let path = PathDecoder::new(&env).decode(&[MoveDirective::Right, MoveDirective::Right]);
/// let map = RouteMap::new(&env).with_path(&path);
/// assert_eq!(map.to_string(), "S**\n.#.\n..E\n");
/// # Ok::<(), shiproute_grid::ConfigurationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteMap<'a> {
    env: &'a GridEnvironment,
    route: HashSet<Coordinate>,
}

impl<'a> RouteMap<'a> {
    #[must_use]
    pub fn new(env: &'a GridEnvironment) -> Self {
        Self {
            env,
            route: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: &DecodedPath) -> Self {
        self.route = path.walked().iter().copied().collect();
        self
    }

    #[must_use]
    pub fn cell(&self, c: Coordinate) -> MapCell {
        if c == self.env.start() {
            MapCell::Start
        } else if c == self.env.end() {
            MapCell::End
        } else if self.env.is_obstacle(c) {
            MapCell::Obstacle
        } else if self.route.contains(&c) {
            MapCell::Route
        } else {
            MapCell::Empty
        }
    }
}

impl fmt::Display for RouteMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = i32::try_from(self.env.size()).map_err(|_| fmt::Error)?;
        for y in 0..size {
            for x in 0..size {
                write!(f, "{}", self.cell(Coordinate::new(x, y)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveDirective, PathDecoder};

    #[test]
    fn test_empty_map() {
        let env = GridEnvironment::new(2, Coordinate::new(0, 0), Coordinate::new(1, 1), [])
            .unwrap();
        assert_eq!(RouteMap::new(&env).to_string(), "S.\n.E\n");
    }

    #[test]
    fn test_route_cells_are_marked() {
        let env = GridEnvironment::new(
            3,
            Coordinate::new(0, 0),
            Coordinate::new(2, 2),
            [Coordinate::new(2, 0)],
        )
        .unwrap();
        let path = PathDecoder::new(&env).decode(&[
            MoveDirective::Down,
            MoveDirective::Down,
            MoveDirective::Right,
        ]);
        let map = RouteMap::new(&env).with_path(&path);
        assert_eq!(map.cell(Coordinate::new(0, 1)), MapCell::Route);
        assert_eq!(map.cell(Coordinate::new(2, 0)), MapCell::Obstacle);
        assert_eq!(map.to_string(), "S.#\n*..\n**E\n");
    }
}
