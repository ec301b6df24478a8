use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A single unit move, the allele of a route genotype.
///
/// Each directive has a fixed integer code (0–3), used for serialization:
///
/// | Code | Directive | Offset     |
/// |------|-----------|------------|
/// | 0    | `Right`   | `(+1, 0)`  |
/// | 1    | `Left`    | `(-1, 0)`  |
/// | 2    | `Down`    | `(0, +1)`  |
/// | 3    | `Up`      | `(0, -1)`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum MoveDirective {
    Right = 0,
    Left = 1,
    Down = 2,
    Up = 3,
}

impl MoveDirective {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Returns the `(dx, dy)` displacement of this move.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// Returns the cell reached by applying this move to `from`.
    ///
    /// The result is not checked against any grid.
    #[must_use]
    pub const fn apply(self, from: Coordinate) -> Coordinate {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid move directive code {_0} (expected 0-3)")]
pub struct InvalidMoveDirective(#[error(not(source))] pub u8);

impl TryFrom<u8> for MoveDirective {
    type Error = InvalidMoveDirective;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(InvalidMoveDirective(code))
    }
}

impl From<MoveDirective> for u8 {
    fn from(directive: MoveDirective) -> Self {
        directive.code()
    }
}

/// Draws a directive uniformly from the four moves.
///
/// This enables `rng.random::<MoveDirective>()`.
impl Distribution<MoveDirective> for StandardUniform {
    fn sample<R>(&self, rng: &mut R) -> MoveDirective
    where
        R: Rng + ?Sized,
    {
        MoveDirective::ALL[rng.random_range(0..MoveDirective::LEN)]
    }
}
