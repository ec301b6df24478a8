//! Grid world for evolutionary route search.
//!
//! This crate holds everything a route candidate is played against:
//!
//! - [`Coordinate`] - Integer cell position on the grid
//! - [`MoveDirective`] - One of four unit moves, the allele of a route genotype
//! - [`GridEnvironment`] - Immutable grid bounds, start, end and obstacle set
//! - [`ObstacleSampler`] - Random obstacle placement for a fresh environment
//! - [`PathDecoder`] / [`DecodedPath`] - Replays a move sequence on the environment
//! - [`RouteMap`] - Plain-text rendering of an environment and a route
//!
//! # Decoding Rules
//!
//! A route is decoded by walking from the start cell, one move per gene. A move that
//! would leave the grid or enter an obstacle is not performed: the walker stays where
//! it is and the current cell is recorded again (a *stall*). After the last gene the end
//! cell is appended unconditionally, whether or not the walk actually reached it.
//!
//! # Example
//!
//! ```
//! use shiproute_grid::{Coordinate, GridEnvironment, MoveDirective, PathDecoder};
//!
//! let env = GridEnvironment::new(
//!     3,
//!     Coordinate::new(0, 0),
//!     Coordinate::new(2, 2),
//!     [Coordinate::new(1, 0)],
//! )?;
//!
//! let path = PathDecoder::new(&env).decode(&[MoveDirective::Right, MoveDirective::Down]);
//! assert_eq!(
//!     path.points(),
//!     &[
//!         Coordinate::new(0, 0),
//!         Coordinate::new(0, 0), // blocked by the obstacle at (1, 0)
//!         Coordinate::new(0, 1),
//!         Coordinate::new(2, 2),
//!     ]
//! );
//! # Ok::<(), shiproute_grid::ConfigurationError>(())
//! ```

pub use self::{coordinate::*, direction::*, environment::*, obstacle::*, path::*, render::*};

mod coordinate;
mod direction;
mod environment;
mod obstacle;
mod path;
mod render;

/// Invalid setup parameters, detected before any evolutionary work begins.
///
/// Every variant is fatal: the run cannot start with the given parameters and retrying
/// with the same values fails the same way.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ConfigurationError {
    #[display("grid size must be at least 1")]
    EmptyGrid,
    #[display("grid size {_0} exceeds the largest supported size {}", i32::MAX)]
    GridTooLarge(#[error(not(source))] u32),
    #[display(
        "grid of size {grid_size} has {} cells, not enough for {obstacle_count} obstacles plus start and end",
        u64::from(*grid_size) * u64::from(*grid_size)
    )]
    GridTooSmall { grid_size: u32, obstacle_count: usize },
    #[display("{role} {coordinate} lies outside the {grid_size}x{grid_size} grid")]
    OutOfBounds {
        role: &'static str,
        coordinate: Coordinate,
        grid_size: u32,
    },
    #[display("start and end must differ (both are {_0})")]
    StartEqualsEnd(#[error(not(source))] Coordinate),
    #[display("{role} {coordinate} is an obstacle")]
    BlockedEndpoint {
        role: &'static str,
        coordinate: Coordinate,
    },
    #[display("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[display("{name} must be at least {min}, got {value}")]
    SizeTooSmall {
        name: &'static str,
        value: usize,
        min: usize,
    },
}
