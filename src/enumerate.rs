//! Candidate program enumeration for one total size.
//!
//! Programs are generated in a fixed order: structural tiers first (no
//! procedures, then one procedure, then two), and within a sequence each slot
//! is filled in action → turn → call order. The order decides only which of
//! several equally-sized solutions is found first; every unpruned candidate
//! of the size is eventually produced.
//!
//! Pruning here is purely syntactic (no map is consulted) and only removes
//! candidates for which an equal-or-smaller equivalent program exists, so the
//! search stays complete and size-minimal.

use std::iter::once;

use itertools::{Either, Itertools};
use strum::VariantArray;

use crate::program::{Instruction, Program};

/// The structural complexity of a candidate, tried in declaration order
/// within each size.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Tier {
    /// `MAIN` only.
    MainOnly,
    /// `MAIN` plus `PROC1`. `PROC2`-only programs are mirror images of these
    /// and are never enumerated.
    OneProc,
    /// All three sequences in use.
    TwoProc,
}

/// A split of a total instruction budget across the three sequences.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    /// Slots in `MAIN`; at least 1.
    pub main: usize,
    /// Slots in `PROC1`.
    pub proc1: usize,
    /// Slots in `PROC2`; nonzero only when `proc1` is nonzero.
    pub proc2: usize,
}

impl Partition {
    /// Which structural tier this partition belongs to.
    pub fn tier(&self) -> Tier {
        match (self.proc1, self.proc2) {
            (0, 0) => Tier::MainOnly,
            (_, 0) => Tier::OneProc,
            _ => Tier::TwoProc,
        }
    }
}

/// Every partition of `total_size`, grouped by tier in tier order.
/// Empty when `total_size` is 0.
pub fn partitions(total_size: usize) -> Vec<Partition> {
    if total_size == 0 {
        return Vec::new();
    }

    let mut out = vec![Partition { main: total_size, proc1: 0, proc2: 0 }];
    for main in 1..total_size {
        out.push(Partition { main, proc1: total_size - main, proc2: 0 });
    }
    for main in 1..total_size {
        for proc1 in 1..(total_size - main) {
            out.push(Partition { main, proc1, proc2: total_size - main - proc1 });
        }
    }

    out
}

/// The slot vocabulary: the five primitives, plus calls to whichever
/// procedures are non-empty in the partition at hand. Relies on
/// [`Instruction`]'s declaration order for the action → turn → call fill order.
fn vocabulary(has_proc1: bool, has_proc2: bool) -> Vec<Instruction> {
    Instruction::VARIANTS
        .iter()
        .copied()
        .filter(|instruction| match instruction {
            Instruction::CallProc1 => has_proc1,
            Instruction::CallProc2 => has_proc2,
            _ => true,
        })
        .collect_vec()
}

/// Every fill of `len` slots from `vocab`, in lexicographic vocabulary order.
fn fills(len: usize, vocab: Vec<Instruction>) -> impl Iterator<Item = Vec<Instruction>> {
    if len == 0 {
        Either::Left(once(Vec::new()))
    } else {
        Either::Right((0..len).map(move |_| vocab.clone()).multi_cartesian_product())
    }
}

/// A procedure body that cannot move, jump, or light anything can never make
/// physical progress, whatever calls it.
fn has_action(sequence: &[Instruction]) -> bool {
    sequence.iter().any(Instruction::is_action)
}

/// Program-level rejections that need all three sequences assembled:
/// bodyless self- or mutual recursion, and procedures nothing references
/// (a body reachable only through its own self-call never executes).
fn degenerate(program: &Program) -> bool {
    if program.proc1.as_slice() == [Instruction::CallProc1] {
        return true;
    }
    if program.proc2.as_slice() == [Instruction::CallProc2] {
        return true;
    }
    if program.proc1.as_slice() == [Instruction::CallProc2]
        && program.proc2.as_slice() == [Instruction::CallProc1]
    {
        return true;
    }

    if !program.proc1.is_empty()
        && !program.main.contains(&Instruction::CallProc1)
        && !program.proc2.contains(&Instruction::CallProc1)
    {
        return true;
    }
    if !program.proc2.is_empty()
        && !program.main.contains(&Instruction::CallProc2)
        && !program.proc1.contains(&Instruction::CallProc2)
    {
        return true;
    }

    false
}

/// Every unpruned candidate with the given size split, procedure bodies
/// varying slowest.
pub fn candidates_in(partition: Partition) -> impl Iterator<Item = Program> {
    let vocab = vocabulary(partition.proc1 > 0, partition.proc2 > 0);
    let (main_len, p1_len, p2_len) = (partition.main, partition.proc1, partition.proc2);

    let main_vocab = vocab.clone();
    let p2_vocab = vocab.clone();
    fills(p1_len, vocab)
        .filter(move |body| p1_len == 0 || has_action(body))
        .flat_map(move |proc1| {
            let main_vocab = main_vocab.clone();
            fills(p2_len, p2_vocab.clone())
                .filter(move |body| p2_len == 0 || has_action(body))
                .map(move |proc2| (proc1.clone(), proc2))
                .flat_map(move |(proc1, proc2)| {
                    fills(main_len, main_vocab.clone())
                        .map(move |main| Program::new(main, proc1.clone(), proc2.clone()))
                })
        })
        .filter(|program| !degenerate(program))
}

/// Every unpruned candidate of exactly `total_size` instruction slots, in
/// tier order.
pub fn candidates(total_size: usize) -> impl Iterator<Item = Program> {
    partitions(total_size).into_iter().flat_map(candidates_in)
}
