use clap::ValueEnum;
use log::{debug, info};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use took::Timer;

use crate::problem::instance::Instance;
use crate::solution::Solution;
use crate::solver::{construct, improve, run_pipeline, SolverParameters};
use crate::utils::create_seeded_rng;
use crate::utils::logging::{format_log_method_solution_timed, format_log_solution};
#[cfg(feature = "search_assertions")]
use crate::utils::validator::assert_valid_solution;

/// Which part of the pipeline is repeated per trial.
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum MultiStartScope {
    /// only the construction is repeated, the best construction is improved once
    ConstructionOnly,
    /// construction and local search are repeated per trial
    FullPipeline,
}

/// Seeds of the trials. The first trial uses `seed` itself, the others draw their seeds from a
/// generator seeded with `seed`, in trial order.
pub fn trial_seeds(seed: i128, trials: usize) -> Vec<i128> {
    let mut master = create_seeded_rng(seed);
    std::iter::once(seed)
        .chain(std::iter::repeat_with(|| master.gen::<i128>()))
        .take(trials)
        .collect()
}

fn run_trial<'a>(
    instance: &'a Instance,
    params: &SolverParameters,
    trial: usize,
    seed: i128,
) -> Solution<'a> {
    let timer = Timer::new();
    let mut rng = create_seeded_rng(seed);
    let solution = match params.multi_start_scope {
        MultiStartScope::FullPipeline => run_pipeline(instance, params.local_search, &mut rng),
        MultiStartScope::ConstructionOnly => construct(instance, &mut rng),
    };

    #[cfg(feature = "search_assertions")]
    assert_valid_solution(&solution);

    debug!(
        "{}",
        format_log_method_solution_timed(&format!("trial {}", trial), &solution, &timer.took())
    );
    solution
}

/// Runs the pipeline `params.trials` times and keeps the best solution (fewer unassigned orders,
/// then lower cost). Earlier trials win ties, also when the trials run in parallel.
pub fn multi_start<'a>(instance: &'a Instance, params: &SolverParameters, seed: i128) -> Solution<'a> {
    let trials = params.trials.max(1);
    let seeds = trial_seeds(seed, trials);

    #[cfg(feature = "parallel")]
    let candidates: Vec<Solution> = seeds
        .into_par_iter()
        .enumerate()
        .map(|(trial, seed)| run_trial(instance, params, trial, seed))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let candidates: Vec<Solution> = seeds
        .into_iter()
        .enumerate()
        .map(|(trial, seed)| run_trial(instance, params, trial, seed))
        .collect();

    let mut best: Option<(usize, Solution)> = None;
    for (trial, candidate) in candidates.into_iter().enumerate() {
        let replace = match &best {
            None => true,
            Some((_, current)) => candidate.is_better_than(current),
        };
        if replace {
            best = Some((trial, candidate));
        }
    }

    let (trial, mut solution) = best.unwrap_or_else(|| (0, Solution::new(instance)));
    info!(
        "best of {} trials: trial {} ({})",
        trials,
        trial,
        format_log_solution(&solution)
    );

    if params.multi_start_scope == MultiStartScope::ConstructionOnly {
        improve(&mut solution, params.local_search);
    }
    solution
}
