use std::fmt::{Display, Formatter};

use strum::VariantArray;

/// One instruction slot of a program. Carries no payload.
///
/// Declaration order is the enumeration order used when filling program
/// slots: action instructions, then turns, then procedure calls.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Instruction {
    /// Advance one tile; legal only onto an equal-height tile.
    Walk,
    /// Advance one tile; legal only across a height difference of exactly 1.
    Jump,
    /// Light the tile under the bot (light tiles), actuate it (elevators),
    /// or do nothing (plain tiles).
    ToggleLight,
    /// Rotate 90° counter-clockwise in place.
    TurnLeft,
    /// Rotate 90° clockwise in place.
    TurnRight,
    /// Push a call frame for `PROC1`.
    CallProc1,
    /// Push a call frame for `PROC2`.
    CallProc2,
}

impl Instruction {
    /// Whether this instruction can make physical progress on the level.
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Walk | Self::Jump | Self::ToggleLight)
    }

    /// Whether this instruction is a procedure call.
    pub fn is_call(&self) -> bool {
        matches!(self, Self::CallProc1 | Self::CallProc2)
    }

    /// One-character code used when serializing programs.
    pub fn code(&self) -> char {
        match self {
            Self::Walk => 'W',
            Self::Jump => 'J',
            Self::ToggleLight => 'L',
            Self::TurnLeft => '<',
            Self::TurnRight => '>',
            Self::CallProc1 => '1',
            Self::CallProc2 => '2',
        }
    }
}

/// Names one of the three instruction sequences of a [`Program`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SequenceId {
    /// The entry sequence.
    Main,
    /// The first procedure.
    Proc1,
    /// The second procedure.
    Proc2,
}

/// A candidate program: a non-empty `MAIN` plus two procedures, either of
/// which may be empty (meaning unused). Procedures may call each other and
/// themselves.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Program {
    /// The entry sequence. Never empty in a well-formed program.
    pub main: Vec<Instruction>,
    /// The first procedure body; empty when unused.
    pub proc1: Vec<Instruction>,
    /// The second procedure body; empty when unused.
    pub proc2: Vec<Instruction>,
}

impl Program {
    /// A program with the given sequences.
    pub fn new(main: Vec<Instruction>, proc1: Vec<Instruction>, proc2: Vec<Instruction>) -> Self {
        Self { main, proc1, proc2 }
    }

    /// A program with no procedures.
    pub fn main_only(main: Vec<Instruction>) -> Self {
        Self { main, proc1: Vec::new(), proc2: Vec::new() }
    }

    /// Total number of instruction slots used across all three sequences.
    pub fn total_size(&self) -> usize {
        self.main.len() + self.proc1.len() + self.proc2.len()
    }

    /// The named sequence.
    pub fn sequence(&self, id: SequenceId) -> &[Instruction] {
        match id {
            SequenceId::Main => &self.main,
            SequenceId::Proc1 => &self.proc1,
            SequenceId::Proc2 => &self.proc2,
        }
    }

    pub(crate) fn codes(seq: &[Instruction]) -> String {
        seq.iter().map(Instruction::code).collect()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MAIN=[{}]", Self::codes(&self.main))?;
        if !self.proc1.is_empty() {
            write!(f, " P1=[{}]", Self::codes(&self.proc1))?;
        }
        if !self.proc2.is_empty() {
            write!(f, " P2=[{}]", Self::codes(&self.proc2))?;
        }
        Ok(())
    }
}
