use serde::Serialize;

use crate::{Coordinate, GridEnvironment, MoveDirective};

/// Replays move sequences on a [`GridEnvironment`].
///
/// Decoding is deterministic and total: any sequence of moves produces a path.
#[derive(Debug, Clone, Copy)]
pub struct PathDecoder<'a> {
    env: &'a GridEnvironment,
}

impl<'a> PathDecoder<'a> {
    #[must_use]
    pub fn new(env: &'a GridEnvironment) -> Self {
        Self { env }
    }

    /// Decodes a move sequence into the visited cells.
    ///
    /// Starting at the environment's start cell, each move is applied in order. A move
    /// into an obstacle or off the grid is skipped and the current cell is recorded
    /// again. The end cell is appended after the last move even when the walk stopped
    /// elsewhere; the path is not repaired, so its last step may be a jump.
    ///
    /// The result always has `moves.len() + 2` points.
    #[must_use]
    pub fn decode(&self, moves: &[MoveDirective]) -> DecodedPath {
        let mut points = Vec::with_capacity(moves.len() + 2);
        let mut current = self.env.start();
        points.push(current);
        for &mv in moves {
            let candidate = mv.apply(current);
            if self.env.is_valid(candidate) {
                current = candidate;
            }
            points.push(current);
        }
        points.push(self.env.end());
        DecodedPath { points }
    }
}

/// Cells visited by a decoded route, from start to end.
///
/// The first point is always the start cell and the last point is always the end cell.
/// Everything in between is one entry per move, repeating the previous cell when the
/// move was not possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecodedPath {
    points: Vec<Coordinate>,
}

impl DecodedPath {
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Cells produced by the moves themselves, without the start and the appended end.
    #[must_use]
    pub fn walked(&self) -> &[Coordinate] {
        &self.points[1..self.points.len() - 1]
    }

    /// Number of moves that were skipped because they were blocked.
    #[must_use]
    pub fn stall_count(&self) -> usize {
        let walked_with_start = &self.points[..self.points.len() - 1];
        walked_with_start.windows(2).filter(|w| w[0] == w[1]).count()
    }

    /// Returns `true` if the walk ended on the end cell or right next to it, i.e. the
    /// final appended step is a real move rather than a jump.
    #[must_use]
    pub fn reaches_end(&self) -> bool {
        let end = self.end();
        let last_walked = self.points[self.points.len() - 2];
        last_walked == end || last_walked.is_adjacent(end)
    }
}
