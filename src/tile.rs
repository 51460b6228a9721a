use serde::{Deserialize, Serialize};

/// What standing on a tile and pressing the action button does.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// An ordinary tile; the action button does nothing here.
    #[default]
    Plain,
    /// A goal tile. The level is solved once every light tile is lit.
    Light,
    /// A tile whose height cycles when actuated; the bot rides it.
    Elevator,
}

/// One tile of a level. Immutable once the [`Map`](crate::Map) is built;
/// lit state and elevator phase live in the per-run
/// [`WorldState`](crate::state::WorldState).
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Tile {
    pub(crate) height: u8,
    pub(crate) kind: TileKind,
}

impl Tile {
    pub(crate) fn new(kind: TileKind, height: u8) -> Self {
        Self { height, kind }
    }

    /// Height of this tile at rest. Elevators may differ at runtime.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The kind of this tile.
    pub fn kind(&self) -> TileKind {
        self.kind
    }
}
