use crate::location::{Direction, Location};

/// Canonical snapshot of everything in the world that instructions can
/// change: the bot's pose, the lit bitmask, and every elevator's phase.
///
/// Used as the loop-detection key of a run. The call stack is deliberately
/// not part of the key: a repeated snapshot means the run has spent
/// instructions without changing the world. Any solving continuation from
/// here is reachable by a smaller program, so the run can be abandoned
/// without losing size-minimality.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WorldState {
    pub(crate) position: Location,
    pub(crate) facing: Direction,
    /// Bit `i` set means light `i` (in [`Map::lights`](crate::Map::lights) order) is lit.
    pub(crate) lit: u64,
    /// Current height of each elevator, in [`Map::elevators`](crate::Map::elevators) order.
    pub(crate) phases: Vec<u8>,
}

impl WorldState {
    /// The bot's position in this snapshot.
    pub fn position(&self) -> Location {
        self.position
    }

    /// The bot's facing in this snapshot.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// How many lights are lit in this snapshot.
    pub fn lit_count(&self) -> u32 {
        self.lit.count_ones()
    }
}
