use std::path::PathBuf;

use clap::Parser;

use crate::solver::{LocalSearchMode, MultiStartScope, SolverParameters};

#[derive(Parser, Debug)]
#[command(version)]
pub struct ProgramArguments {
    #[arg(long, help = "rng seed")]
    pub seed: Option<i128>,

    #[arg(
        short,
        long,
        help = "instance file path",
        required_unless_present = "scenario"
    )]
    pub instance: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "fleet catalog file path",
        required_unless_present = "scenario"
    )]
    pub fleet: Option<PathBuf>,

    #[arg(short, long, help = "solution file path")]
    pub solution: Option<PathBuf>,

    #[arg(
        long,
        help = "directory to store the solution",
        conflicts_with = "solution"
    )]
    pub solution_directory: Option<PathBuf>,

    #[arg(
        long,
        help = "scenario file listing the fleet and the instances to solve",
        conflicts_with_all = ["instance", "fleet", "solution", "solution_directory"]
    )]
    pub scenario: Option<PathBuf>,

    #[arg(long, help = "write a json summary of all runs to this file")]
    pub summary: Option<PathBuf>,

    #[arg(
        long,
        help = "leave orders that no vehicle type can serve unassigned instead of failing",
        default_value = "false"
    )]
    pub allow_unroutable: bool,

    #[command(flatten)]
    pub solver: SolverArguments,

    #[arg(long, help = "print summary to stdout", default_value = "false")]
    pub print_summary_to_stdout: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SolverArguments {
    #[arg(long, default_value = "5", help = "number of multi-start trials")]
    pub trials: usize,
    #[arg(long, value_enum, default_value = "full")]
    pub local_search: LocalSearchMode,
    #[arg(long, value_enum, default_value = "full-pipeline")]
    pub multi_start_scope: MultiStartScope,
}

impl SolverArguments {
    pub(crate) fn solver_parameters(&self) -> SolverParameters {
        SolverParameters {
            trials: self.trials,
            local_search: self.local_search,
            multi_start_scope: self.multi_start_scope,
        }
    }
}
