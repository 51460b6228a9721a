use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::engine::{execute, RunOutcome};
use crate::enumerate::{candidates_in, partitions};
use crate::map::Map;
use crate::medal::{Medal, MedalThresholds};
use crate::program::Program;

/// Immutable search configuration passed into [`solve`]; there is no
/// process-wide solver state.
#[derive(Copy, Clone, Debug)]
pub struct SolveConfig {
    /// Largest total program size to try before giving up.
    pub max_size: usize,
    /// Per-candidate step budget.
    pub step_limit: u32,
    /// The level's medal thresholds.
    pub medals: MedalThresholds,
}

impl SolveConfig {
    /// Configuration with the default search bounds.
    pub fn new(medals: MedalThresholds) -> Self {
        Self { max_size: 12, step_limit: 200, medals }
    }
}

/// A solving program plus its solve metadata.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// The minimal program found.
    pub program: Program,
    /// Step budget units its run consumed up to the solve.
    pub steps: u32,
    /// Medal tier for the program's size.
    pub medal: Medal,
}

impl Solution {
    /// Total instruction count of the program.
    pub fn size(&self) -> usize {
        self.program.total_size()
    }
}

/// How a search ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveOutcome {
    /// The smallest solving program over all sizes searched, with the
    /// simplest structural tier preferred among programs of that size.
    Solved(Solution),
    /// No program up to `max_size` solves the level. A practical bound, not a
    /// proof of unsolvability; the caller may retry with a larger bound.
    Failed {
        /// The largest total size attempted.
        max_size: usize,
    },
}

fn search_size(map: &Map, size: usize, config: &SolveConfig) -> Option<Solution> {
    let mut tested = 0u64;
    let mut looped = 0u64;
    let mut over_budget = 0u64;

    for partition in partitions(size) {
        for program in candidates_in(partition) {
            tested += 1;
            match execute(&program, map, config.step_limit) {
                RunOutcome::Solved { steps } => {
                    info!(program = %program, size, steps, "found minimal solution");
                    return Some(Solution {
                        medal: config.medals.score(size),
                        program,
                        steps,
                    });
                }
                RunOutcome::LoopDetected => looped += 1,
                RunOutcome::StepLimitExceeded => over_budget += 1,
                RunOutcome::Failed => {}
            }
        }
    }

    debug!(size, tested, looped, over_budget, "size exhausted without a solution");
    None
}

/// Find the smallest program that solves `map`, by iterative deepening over
/// total program size.
///
/// Sizes are exhausted in increasing order and, within a size, structural
/// tiers in increasing complexity, so the first solve is globally
/// size-minimal and prefers fewer procedures among equally-sized solutions.
/// Candidates that loop or outrun the step budget are simply skipped.
pub fn solve(map: &Map, config: &SolveConfig) -> SolveOutcome {
    for size in 1..=config.max_size {
        if let Some(solution) = search_size(map, size, config) {
            return SolveOutcome::Solved(solution);
        }
    }

    SolveOutcome::Failed { max_size: config.max_size }
}

/// [`solve`], sharding each size's partitions across rayon workers.
///
/// The map is shared read-only and every run's state is private, so the only
/// coordination is the published best partition index: a worker stops early
/// once a solution in a lower-indexed (simpler-tier) partition exists, and
/// workers on lower-indexed partitions run to completion, preserving the
/// structural-tier tie-break. Returns a solution of the same size and tier as
/// the sequential search.
pub fn solve_parallel(map: &Map, config: &SolveConfig) -> SolveOutcome {
    for size in 1..=config.max_size {
        let parts = partitions(size);
        let best_index = AtomicUsize::new(usize::MAX);
        let best: Mutex<Option<(usize, Solution)>> = Mutex::new(None);

        parts.par_iter().enumerate().for_each(|(index, partition)| {
            for program in candidates_in(*partition) {
                // a solve in an earlier partition beats anything found here
                if best_index.load(Ordering::Relaxed) < index {
                    return;
                }

                if let RunOutcome::Solved { steps } = execute(&program, map, config.step_limit) {
                    let mut slot = best.lock().unwrap();
                    if slot.as_ref().map_or(true, |(held, _)| index < *held) {
                        best_index.fetch_min(index, Ordering::Relaxed);
                        *slot = Some((
                            index,
                            Solution {
                                medal: config.medals.score(size),
                                program,
                                steps,
                            },
                        ));
                    }
                    return;
                }
            }
        });

        let found = best.lock().unwrap().take();
        if let Some((_, solution)) = found {
            info!(program = %solution.program, size, "found minimal solution (parallel)");
            return SolveOutcome::Solved(solution);
        }
        debug!(size, "size exhausted without a solution");
    }

    SolveOutcome::Failed { max_size: config.max_size }
}
