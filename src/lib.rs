#![warn(missing_docs)]

//! # `filament`
//!
//! A program synthesizer for LightBot-style grid puzzles: a robot walks and
//! jumps across tiles of varying height, turns in place, and toggles "light"
//! goal tiles; the puzzle is solved when every light is lit.
//! Begin by building a level with [`MapBuilder`](builder::MapBuilder) or by
//! deserializing a [`LevelDescriptor`](level::LevelDescriptor), then call
//! [`solve()`](solve::solve) (or [`solve_parallel()`](solve::solve_parallel))
//! with a [`SolveConfig`](solve::SolveConfig).
//!
//! # Internals
//! A program is three instruction sequences: `MAIN` plus two procedures that
//! may call each other or themselves. The synthesizer returns the program with
//! the globally smallest total instruction count that solves the level.
//!
//! A high level overview is as follows:
//!
//! The search is iterative deepening over total program size. For each size,
//! candidate programs are enumerated in fixed structural tiers (no procedures,
//! one procedure, two procedures) with syntactic pruning of candidates that
//! provably cannot help: bodyless self- or mutual recursion, procedure bodies
//! with no physical action, procedures nothing references. Each survivor is
//! run by a deterministic interpreter that keeps an explicit call stack, so
//! procedure recursion is bounded only by the step budget and never by host
//! stack depth. After every primitive instruction the interpreter snapshots
//! the world (bot pose, lit lights, elevator phases); revisiting a snapshot
//! within one run proves the run has stopped making world progress and the
//! candidate is abandoned. The first solving candidate is size-minimal because
//! sizes are exhausted in increasing order, and within a size the simplest
//! structural tier wins as a tie-break.

pub use builder::MapBuilder;
pub use engine::{execute, BotState, Run, RunOutcome};
pub use level::{LevelDescriptor, SolveReport};
pub use location::{Direction, Location};
pub use map::{can_advance, LevelError, Map, MoveMode};
pub use medal::{Medal, MedalThresholds};
pub use program::{Instruction, Program, SequenceId};
pub use solve::{solve, solve_parallel, Solution, SolveConfig, SolveOutcome};
pub use state::WorldState;

pub(crate) mod builder;
pub(crate) mod engine;
pub mod enumerate;
pub(crate) mod level;
pub(crate) mod location;
pub(crate) mod map;
pub(crate) mod medal;
pub(crate) mod program;
pub(crate) mod solve;
pub(crate) mod state;
mod tests;
pub(crate) mod tile;
