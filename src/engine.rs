use std::collections::HashSet;

use crate::location::{Direction, Location};
use crate::map::{can_advance, Map, MoveMode};
use crate::program::{Instruction, Program, SequenceId};
use crate::state::WorldState;
use crate::tile::TileKind;

/// Actuating an elevator advances its height by this much...
const ELEVATOR_STEP: u8 = 2;
/// ...modulo this cycle length.
const ELEVATOR_CYCLE: u8 = 6;

/// Terminal status of one program run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    /// Every light was lit after `steps` budget units.
    Solved {
        /// Budget units consumed up to and including the solving instruction.
        steps: u32,
    },
    /// The program ran to completion without lighting every light.
    Failed,
    /// The run revisited a [`WorldState`] and can make no further progress.
    LoopDetected,
    /// The step budget ran out first.
    StepLimitExceeded,
}

/// One call-stack entry: the sequence being executed and the index of the
/// next instruction in it.
#[derive(Copy, Clone, Debug)]
struct Frame {
    sequence: SequenceId,
    index: usize,
}

impl Frame {
    fn enter(sequence: SequenceId) -> Self {
        Self { sequence, index: 0 }
    }
}

/// The bot's pose plus its procedure call stack.
#[derive(Clone, Debug)]
pub struct BotState {
    /// Where the bot stands.
    pub position: Location,
    /// Which way the bot faces.
    pub facing: Direction,
    stack: Vec<Frame>,
}

impl BotState {
    /// Current call depth, counting the `MAIN` frame.
    pub fn call_depth(&self) -> usize {
        self.stack.len()
    }
}

/// A single in-progress execution of a program against a map.
///
/// The interpreter keeps an explicit call stack rather than recursing, so
/// procedure recursion is bounded only by the step budget. Every dequeued
/// instruction (procedure calls included) consumes one budget unit, which
/// is what bounds call depth and terminates call-only spirals. Driving a run
/// one primitive at a time via [`advance`](Self::advance) is also how a
/// renderer replays a solution or an editor validates a hand-built program:
/// execution is a pure function of `(program, map, step_limit)`.
pub struct Run<'a> {
    program: &'a Program,
    map: &'a Map,
    bot: BotState,
    lit: u64,
    phases: Vec<u8>,
    steps: u32,
    step_limit: u32,
    visited: HashSet<WorldState>,
}

impl<'a> Run<'a> {
    /// Set up a fresh run at the map's start pose with an empty visited set.
    pub fn new(program: &'a Program, map: &'a Map, step_limit: u32) -> Self {
        let (position, facing) = map.start();
        Self {
            program,
            map,
            bot: BotState { position, facing, stack: vec![Frame::enter(SequenceId::Main)] },
            lit: 0,
            phases: map.initial_phases(),
            steps: 0,
            step_limit,
            visited: HashSet::new(),
        }
    }

    /// The bot's current pose and call stack.
    pub fn bot(&self) -> &BotState {
        &self.bot
    }

    /// Budget units consumed so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Snapshot of the current world state.
    pub fn world_state(&self) -> WorldState {
        WorldState {
            position: self.bot.position,
            facing: self.bot.facing,
            lit: self.lit,
            phases: self.phases.clone(),
        }
    }

    /// Execute up to the next primitive instruction (resolving any procedure
    /// calls and frame pops on the way). Returns `None` while the run is
    /// still in progress, `Some` once it reaches a terminal status.
    pub fn advance(&mut self) -> Option<RunOutcome> {
        loop {
            let frame = match self.bot.stack.last_mut() {
                // MAIN exhausted with lights still unlit.
                None => return Some(RunOutcome::Failed),
                Some(frame) => frame,
            };

            let sequence = self.program.sequence(frame.sequence);
            if frame.index >= sequence.len() {
                self.bot.stack.pop();
                continue;
            }

            let instruction = sequence[frame.index];
            frame.index += 1;

            if self.steps >= self.step_limit {
                return Some(RunOutcome::StepLimitExceeded);
            }
            self.steps += 1;

            match instruction {
                Instruction::CallProc1 => {
                    self.bot.stack.push(Frame::enter(SequenceId::Proc1));
                }
                Instruction::CallProc2 => {
                    self.bot.stack.push(Frame::enter(SequenceId::Proc2));
                }
                primitive => {
                    self.apply(primitive);

                    if self.lit == self.map.all_lit_mask() {
                        return Some(RunOutcome::Solved { steps: self.steps });
                    }
                    // Calls cannot change the world, so the repeat check only
                    // runs after primitives.
                    if !self.visited.insert(self.world_state()) {
                        return Some(RunOutcome::LoopDetected);
                    }

                    return None;
                }
            }
        }
    }

    /// Run to a terminal status.
    pub fn finish(mut self) -> RunOutcome {
        loop {
            if let Some(outcome) = self.advance() {
                return outcome;
            }
        }
    }

    /// Effective height of a tile right now: elevators sit at their phase,
    /// everything else at its rest height.
    fn height_at(&self, location: Location) -> u8 {
        match self.map.elevator_index(location) {
            Some(i) => self.phases[i],
            None => self.map.tile(location).height,
        }
    }

    fn apply(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::Walk => self.advance_bot(MoveMode::Walk),
            Instruction::Jump => self.advance_bot(MoveMode::Jump),
            Instruction::TurnLeft => self.bot.facing = self.bot.facing.turned_left(),
            Instruction::TurnRight => self.bot.facing = self.bot.facing.turned_right(),
            Instruction::ToggleLight => match self.map.tile(self.bot.position).kind() {
                TileKind::Light => {
                    // Idempotent: lighting an already-lit tile is harmless.
                    let i = self.map.light_index(self.bot.position).unwrap();
                    self.lit |= 1 << i;
                }
                TileKind::Elevator => {
                    let i = self.map.elevator_index(self.bot.position).unwrap();
                    self.phases[i] = (self.phases[i] + ELEVATOR_STEP) % ELEVATOR_CYCLE;
                }
                TileKind::Plain => {}
            },
            Instruction::CallProc1 | Instruction::CallProc2 => unreachable!(),
        }
    }

    /// Illegal moves are silent no-ops; they still consumed their step.
    fn advance_bot(&mut self, mode: MoveMode) {
        let target = self.bot.facing.step_from(self.bot.position);
        if !self.map.in_bounds(target) {
            return;
        }

        let from = self.height_at(self.bot.position);
        let to = self.height_at(target);
        if can_advance(from, to, mode) {
            self.bot.position = target;
        }
    }
}

/// Run `program` against `map` with the given step budget and report how the
/// run ended. Deterministic: identical inputs always produce identical
/// outcomes and identical terminal world states.
pub fn execute(program: &Program, map: &Map, step_limit: u32) -> RunOutcome {
    Run::new(program, map, step_limit).finish()
}
