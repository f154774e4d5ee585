use clap::ValueEnum;
use log::info;
use took::{Timer, Took};

use crate::construction::insertion::SequentialInsertion;
use crate::problem::instance::Instance;
use crate::solution::permutation::{LocalSearch, LocalSearchStats};
use crate::solution::Solution;
use crate::utils::logging::format_log_method_solution_timed;
use crate::utils::Random;

pub mod multistart;

pub use multistart::{multi_start, MultiStartScope};

pub const DEFAULT_NUMBER_OF_TRIALS: usize = 5;

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum LocalSearchMode {
    Disabled,
    TwoOpt,
    Relocate,
    Full,
}

impl LocalSearchMode {
    pub fn local_search(&self) -> Option<LocalSearch> {
        match self {
            Self::Disabled => None,
            Self::TwoOpt => Some(LocalSearch::new(true, false)),
            Self::Relocate => Some(LocalSearch::new(false, true)),
            Self::Full => Some(LocalSearch::new(true, true)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SolverParameters {
    /// number of independent multi-start trials
    pub trials: usize,
    pub local_search: LocalSearchMode,
    pub multi_start_scope: MultiStartScope,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            trials: DEFAULT_NUMBER_OF_TRIALS,
            local_search: LocalSearchMode::Full,
            multi_start_scope: MultiStartScope::FullPipeline,
        }
    }
}

pub struct SolverResult<'a> {
    pub solution: Solution<'a>,
    pub time: Took,
}

pub fn construct<'a, 'b>(instance: &'a Instance, rng: &mut Random) -> Solution<'b>
where
    'a: 'b,
{
    SequentialInsertion::new(instance).construct(rng)
}

/// Improves `solution` in place, `None` if local search is disabled.
pub fn improve(solution: &mut Solution, mode: LocalSearchMode) -> Option<LocalSearchStats> {
    let ls = mode.local_search()?;
    let stats = ls.improve(solution);
    info!(
        "local search ({:?}): {:.3} -> {:.3} ({} moves)",
        mode,
        stats.cost_before,
        stats.cost_after,
        stats.total_accepted()
    );
    Some(stats)
}

/// Construction followed by the configured local search.
pub fn run_pipeline<'a>(
    instance: &'a Instance,
    mode: LocalSearchMode,
    rng: &mut Random,
) -> Solution<'a> {
    let mut solution = construct(instance, rng);
    improve(&mut solution, mode);
    solution
}

pub fn solve<'a>(instance: &'a Instance, params: &SolverParameters, seed: i128) -> SolverResult<'a> {
    let timer = Timer::new();
    info!(
        "multi-start with {} trials (scope: {:?}, local search: {:?})",
        params.trials, params.multi_start_scope, params.local_search
    );
    let solution = multi_start(instance, params, seed);
    let time = timer.took();
    info!(
        "{}",
        format_log_method_solution_timed("MultiStart", &solution, &time)
    );

    SolverResult { solution, time }
}
