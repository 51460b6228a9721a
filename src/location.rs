use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

/// A location `(x, y)` on a level. The top left corner is `Location(0, 0)`;
/// `y` grows downward.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// A facing direction of the bot.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward `y = 0`.
    North,
    /// Toward growing `x`.
    East,
    /// Toward growing `y`.
    South,
    /// Toward `x = 0`.
    West,
}

impl Direction {
    /// The location one tile ahead of `location` when facing `self`.
    ///
    /// Stepping off the low edge of the grid wraps to a huge coordinate, so an
    /// ordinary bounds check on the result rejects it.
    pub fn step_from(&self, location: Location) -> Location {
        match self {
            Self::North => location.offset_by((0, -1)),
            Self::East => location.offset_by((1, 0)),
            Self::South => location.offset_by((0, 1)),
            Self::West => location.offset_by((-1, 0)),
        }
    }

    /// Rotate 90° counter-clockwise.
    pub fn turned_left(&self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Rotate 90° clockwise.
    pub fn turned_right(&self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }
}
