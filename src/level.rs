use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::location::{Direction, Location};
use crate::map::{LevelError, Map};
use crate::medal::{Medal, MedalThresholds};
use crate::program::Program;
use crate::solve::SolveOutcome;
use crate::tile::{Tile, TileKind};

/// Wire form of one tile: kind and height.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TileDescriptor {
    /// Tile kind.
    #[serde(rename = "t")]
    pub kind: TileKind,
    /// Tile height at rest.
    #[serde(rename = "h")]
    pub height: u8,
}

/// Wire form of the bot's start pose.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct StartPose {
    /// Column, 0 at the left.
    pub x: usize,
    /// Row, 0 at the top.
    pub y: usize,
    /// Initial facing.
    pub direction: Direction,
}

/// A serialized level: the tile grid, the bot's start pose, and the medal
/// thresholds. This is the crate's entire input surface; deserializing one
/// and calling [`to_map`](Self::to_map) performs every `InvalidLevel` check
/// before any search is attempted. The crate itself never performs I/O.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Rows of tiles, row 0 at the top. Must be a non-empty rectangle.
    pub tiles: Vec<Vec<TileDescriptor>>,
    /// Where the bot begins.
    pub start: StartPose,
    /// Instruction-count thresholds for scoring.
    pub medals: MedalThresholds,
}

impl LevelDescriptor {
    /// Validate this descriptor and convert it into a [`Map`].
    pub fn to_map(&self) -> Result<Map, LevelError> {
        let height = self.tiles.len();
        let width = self.tiles.first().map(|row| row.len()).unwrap_or(0);
        if height == 0 || width == 0 || self.tiles.iter().any(|row| row.len() != width) {
            return Err(LevelError::NonRectangular);
        }

        let tiles = Array2::from_shape_fn((height, width), |(y, x)| {
            let descriptor = self.tiles[y][x];
            Tile::new(descriptor.kind, descriptor.height)
        });

        let start = (Location(self.start.x, self.start.y), self.start.direction);
        Map::from_parts(tiles, start)
    }
}

/// Wire form of a finished search: the solving program with one code per
/// instruction plus its metadata, or a failure status plus the largest size
/// attempted.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SolveReport {
    /// A minimal solution was found.
    Solved {
        /// `MAIN` as instruction codes.
        main: String,
        /// `PROC1` as instruction codes; empty when unused.
        proc1: String,
        /// `PROC2` as instruction codes; empty when unused.
        proc2: String,
        /// Total instruction count.
        size: usize,
        /// Step budget units the solving run consumed.
        steps: u32,
        /// Medal tier for `size`.
        medal: Medal,
    },
    /// No program up to `max_size` solves the level.
    Failed {
        /// The largest total size attempted.
        max_size: usize,
    },
}

impl From<&SolveOutcome> for SolveReport {
    fn from(outcome: &SolveOutcome) -> Self {
        match outcome {
            SolveOutcome::Solved(solution) => Self::Solved {
                main: Program::codes(&solution.program.main),
                proc1: Program::codes(&solution.program.proc1),
                proc2: Program::codes(&solution.program.proc2),
                size: solution.size(),
                steps: solution.steps,
                medal: solution.medal,
            },
            SolveOutcome::Failed { max_size } => Self::Failed { max_size: *max_size },
        }
    }
}
