use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::location::Location;

/// One of the four sides of a square cell, which doubles as the direction of a single step on the grid.
///
/// The declaration order is the search priority; the solver always tries [`Up`](Self::Up) first and [`Right`](Self::Right) last.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub enum SquareStep {
    /// Towards smaller `y`.
    Up,
    /// Towards larger `y`.
    Down,
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
}

/// The axis a straight run of path lies on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// This is pure geometry; whether the result is actually on a board is for the board to say.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// The opposite side.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The axis this step moves along.
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::Up | Self::Down => Orientation::Vertical,
            Self::Left | Self::Right => Orientation::Horizontal,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not orthogonally adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|dir| dir.attempt_from(a) == b)
    }

    /// Forward directions are those which, stepping from one location to another, lead to a larger location in row-major order.
    pub(crate) fn ensure_forward(&self) -> Self {
        match self {
            Self::Down | Self::Right => *self,
            Self::Up | Self::Left => self.invert(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::{Orientation, SquareStep};
    use crate::location::Location;

    #[test]
    fn step_and_invert() {
        for step in SquareStep::VARIANTS {
            let there = step.attempt_from(Location(3, 3));
            assert_eq!(step.invert().attempt_from(there), Location(3, 3));
            assert_eq!(SquareStep::direction_to(Location(3, 3), there), Some(*step));
            assert_eq!(step.orientation(), step.invert().orientation());
        }
    }

    #[test]
    fn not_adjacent() {
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(2, 2)), None);
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(1, 1)), None);
        assert_eq!(SquareStep::Left.orientation(), Orientation::Horizontal);
    }
}
