use ndarray::Array2;
use thiserror::Error;

use crate::location::{Direction, Location};
use crate::tile::{Tile, TileKind};

/// The lit set is kept as a `u64` bitmask on the hot simulation path, so a
/// level may hold at most this many light tiles.
pub(crate) const MAX_LIGHTS: usize = 64;

/// Ways a level can be rejected before any search is attempted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The tile grid has rows of unequal length, or no tiles at all.
    #[error("tile grid is not a non-empty rectangle")]
    NonRectangular,
    /// A level without light tiles has nothing to solve.
    #[error("level has no light tiles")]
    NoLightTiles,
    /// More light tiles than the lit bitmask can track.
    #[error("level has more than {MAX_LIGHTS} light tiles")]
    TooManyLights,
    /// The bot's start position is outside the grid.
    #[error("start position {0} is out of bounds")]
    StartOutOfBounds(Location),
    /// A tile or feature was placed outside the grid while building.
    #[error("feature at {0} is out of bounds")]
    FeatureOutOfBounds(Location),
}

/// How the bot is attempting to move onto an adjacent tile.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveMode {
    /// Level movement; legal only between equal heights.
    Walk,
    /// A hop up or down; legal only across a height difference of exactly 1.
    Jump,
}

/// Whether the bot may advance from a tile of height `from` onto an adjacent
/// tile of height `to` using `mode`.
///
/// This predicate is the single source of truth for movement legality; the
/// execution engine handles the off-grid case by never producing a target
/// tile to test.
pub fn can_advance(from: u8, to: u8, mode: MoveMode) -> bool {
    match mode {
        MoveMode::Walk => to == from,
        MoveMode::Jump => from.abs_diff(to) == 1,
    }
}

/// An immutable level: the tile grid, the bot's start pose, and the locations
/// of every light and elevator tile.
///
/// [`Map`]s are built with a [`MapBuilder`](crate::builder::MapBuilder) or
/// from a [`LevelDescriptor`](crate::level::LevelDescriptor); both reject
/// invalid levels with a [`LevelError`]. The map is never mutated by the
/// search, so it can be shared freely across solver workers.
#[derive(Clone, Debug)]
pub struct Map {
    pub(crate) tiles: Array2<Tile>,
    pub(crate) start: (Location, Direction),
    pub(crate) lights: Vec<Location>,
    pub(crate) elevators: Vec<Location>,
}

impl Map {
    /// Validates and assembles a map from an already-rectangular tile array.
    pub(crate) fn from_parts(
        tiles: Array2<Tile>,
        start: (Location, Direction),
    ) -> Result<Self, LevelError> {
        let mut lights = Vec::new();
        let mut elevators = Vec::new();
        for (index, tile) in tiles.indexed_iter() {
            match tile.kind {
                TileKind::Light => lights.push(Location::from(index)),
                TileKind::Elevator => elevators.push(Location::from(index)),
                TileKind::Plain => {}
            }
        }

        if lights.is_empty() {
            return Err(LevelError::NoLightTiles);
        }
        if lights.len() > MAX_LIGHTS {
            return Err(LevelError::TooManyLights);
        }

        let map = Self { tiles, start: (Location(0, 0), start.1), lights, elevators };
        if !map.in_bounds(start.0) {
            return Err(LevelError::StartOutOfBounds(start.0));
        }

        Ok(Self { start, ..map })
    }

    /// Grid dimensions as `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        let (rows, cols) = self.tiles.dim();
        (cols, rows)
    }

    /// Whether `location` lies on the grid.
    pub fn in_bounds(&self, location: Location) -> bool {
        let (width, height) = self.dims();
        location.0 < width && location.1 < height
    }

    /// The tile at `location`, which must be in bounds.
    pub fn tile(&self, location: Location) -> &Tile {
        &self.tiles[location.as_index()]
    }

    /// The bot's start pose.
    pub fn start(&self) -> (Location, Direction) {
        self.start
    }

    /// Every light tile location, in the fixed order used by the lit bitmask.
    pub fn lights(&self) -> &[Location] {
        &self.lights
    }

    /// Every elevator tile location, in the fixed order used by the phase vector.
    pub fn elevators(&self) -> &[Location] {
        &self.elevators
    }

    /// Bitmask with one set bit per light tile; the solved condition.
    pub(crate) fn all_lit_mask(&self) -> u64 {
        if self.lights.len() == MAX_LIGHTS {
            u64::MAX
        } else {
            (1u64 << self.lights.len()) - 1
        }
    }

    pub(crate) fn light_index(&self, location: Location) -> Option<usize> {
        self.lights.iter().position(|l| *l == location)
    }

    pub(crate) fn elevator_index(&self, location: Location) -> Option<usize> {
        self.elevators.iter().position(|l| *l == location)
    }

    /// Initial elevator phase vector: each elevator starts at its rest height.
    pub(crate) fn initial_phases(&self) -> Vec<u8> {
        self.elevators.iter().map(|l| self.tile(*l).height).collect()
    }
}
