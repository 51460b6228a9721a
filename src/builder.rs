use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};

use crate::location::{Dimension, Direction, Location};
use crate::map::{LevelError, Map};
use crate::tile::{Tile, TileKind};

/// A builder for rectangular levels.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save
/// their state at some point. Feature methods accumulate [`LevelError`]s
/// instead of panicking; [`build`](Self::build) reports the first one.
#[derive(Clone)]
pub struct MapBuilder {
    // width, height
    dims: (Dimension, Dimension),
    tiles: Array2<Tile>,
    start: (Location, Direction),
    invalid_reasons: Vec<LevelError>,
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl MapBuilder {
    /// Construct a new builder with the specified dimensions, in `(x, y)` order.
    /// Every tile starts as a plain tile of height 0; the bot starts at the top
    /// left corner facing east.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            tiles: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Tile::default),
            start: (Location(0, 0), Direction::East),
            invalid_reasons: Vec::new(),
        }
    }

    fn check_bounds(&mut self, location: Location) -> bool {
        if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
            self.invalid_reasons.push(LevelError::FeatureOutOfBounds(location));
            return false;
        }

        true
    }

    /// Place a tile of the given kind and height at `location`, replacing
    /// whatever was there.
    ///
    /// May invalidate the builder with
    /// [`FeatureOutOfBounds`](LevelError::FeatureOutOfBounds) if `location` is
    /// out of bounds. If the builder is already invalid, this does nothing.
    pub fn tile_at(&mut self, location: Location, kind: TileKind, height: u8) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.check_bounds(location) {
            self.tiles.index_mut(location.as_index()).assign_elem(Tile::new(kind, height));
        }

        self
    }

    /// Shorthand for a light tile; see [`tile_at`](Self::tile_at).
    pub fn light_at(&mut self, location: Location, height: u8) -> &mut Self {
        self.tile_at(location, TileKind::Light, height)
    }

    /// Shorthand for an elevator tile; see [`tile_at`](Self::tile_at).
    pub fn elevator_at(&mut self, location: Location, height: u8) -> &mut Self {
        self.tile_at(location, TileKind::Elevator, height)
    }

    /// Set the bot's start pose.
    ///
    /// May invalidate the builder with
    /// [`FeatureOutOfBounds`](LevelError::FeatureOutOfBounds) if `location` is
    /// out of bounds. If the builder is already invalid, this does nothing.
    pub fn start_at(&mut self, location: Location, facing: Direction) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.check_bounds(location) {
            self.start = (location, facing);
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<LevelError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<LevelError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Map`], running the full
    /// level validation (at least one light tile, start in bounds, ...).
    pub fn build(&self) -> Result<Map, LevelError> {
        if let Some(reasons) = self.is_valid() {
            return Err(reasons[0].clone());
        }

        Map::from_parts(self.tiles.clone(), self.start)
    }
}
