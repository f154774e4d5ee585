#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches};
use itertools::Itertools;
use log::{debug, info, log_enabled, warn, Level};
use rand::random;
use took::Timer;

use crate::cli::ProgramArguments;
use crate::evaluation::selector::UnroutableOrders;
use crate::evaluation::simulator::schedule;
use crate::io::fleet_reader::load_fleet;
use crate::io::instance_reader::load_instance;
use crate::io::scenario::load_scenario;
use crate::io::solution_writer::write_solution_file;
use crate::io::summary::{write_summary_file, RunSummary};
use crate::problem::fleet::VehicleType;
use crate::solver::SolverParameters;
use crate::utils::validator::validate_solution;

mod cli;
mod construction;
mod evaluation;
mod io;
mod problem;
mod solution;
mod solver;
mod utils;

/// An instance to solve and where to put its solution.
struct Job {
    instance: PathBuf,
    solution: Option<PathBuf>,
}

/// Argument files may hold several whitespace separated arguments per line
/// (`--trials 3`); arguments given on the command line are taken as they are.
fn parse_argfile(content: &str, prefix: char) -> Vec<argfile::Argument> {
    content
        .lines()
        .flat_map(|line| line.split_whitespace())
        .map(|token| argfile::Argument::parse_ref(token, prefix))
        .collect()
}

fn default_solution_path(directory: &Path, instance: &Path) -> Option<PathBuf> {
    let stem = instance.file_stem()?.to_string_lossy();
    Some(directory.join(format!("{}.sol.csv", stem)))
}

fn collect_jobs(args: &ProgramArguments) -> anyhow::Result<(Vec<VehicleType>, Vec<Job>)> {
    if let Some(scenario_path) = &args.scenario {
        let scenario = load_scenario(scenario_path)?;
        info!(
            "scenario {} with {} runs",
            scenario_path.display(),
            scenario.runs.len()
        );
        let fleet = load_fleet(&scenario.fleet)?;
        let jobs = scenario
            .runs
            .iter()
            .map(|run| Job {
                instance: run.instance.clone(),
                solution: scenario.solution_path(run),
            })
            .collect();
        Ok((fleet, jobs))
    } else {
        let fleet_path = args.fleet.as_ref().context("no fleet catalog given")?;
        let instance = args.instance.clone().context("no instance given")?;
        let solution = args.solution.clone().or_else(|| {
            args.solution_directory
                .as_ref()
                .and_then(|dir| default_solution_path(dir, &instance))
        });
        Ok((load_fleet(fleet_path)?, vec![Job { instance, solution }]))
    }
}

fn run(
    job: &Job,
    fleet: Vec<VehicleType>,
    args: &ProgramArguments,
    params: &SolverParameters,
    seed_value: i128,
) -> anyhow::Result<RunSummary> {
    let load_timer = Timer::new();
    let instance = load_instance(&job.instance, fleet)?;
    info!("instance loaded after {}", load_timer.took());

    if let Err(unroutable) = UnroutableOrders::check(&instance) {
        if args.allow_unroutable {
            warn!("{} - they are left unassigned", unroutable);
        } else {
            return Err(unroutable).with_context(|| format!("instance {}", instance.name));
        }
    }

    info!("starting solver");
    let res = solver::solve(&instance, params, seed_value);
    info!("finished after {}", res.time);

    validate_solution(&res.solution)
        .with_context(|| format!("invalid solution for instance {}", instance.name))?;

    if log_enabled!(Level::Debug) {
        for (idx, route) in res.solution.routes.iter().enumerate() {
            let vehicle = instance.vehicle(route.vehicle);
            if let Some(visits) = schedule(&instance, &route.orders, vehicle) {
                debug!(
                    "route {} (family {}, cost {:.3}): {}",
                    idx,
                    vehicle.family,
                    route.cost,
                    visits
                        .iter()
                        .map(|it| format!(
                            "{}@{:.0}",
                            instance.order(it.order).oid,
                            it.service_start
                        ))
                        .join(" ")
                );
            }
        }
    }

    let desc = res.solution.to_description();
    info!("best solution found: {}", desc.get_summary_string());
    if desc.number_of_unassigned_orders() > 0 {
        warn!(
            "unassigned orders: {}",
            desc.unassigned_orders().iter().join(", ")
        );
    }

    if args.print_summary_to_stdout {
        println!(
            "{},{},{},{},{}",
            instance.name,
            desc.number_of_unassigned_orders(),
            desc.number_of_routes(),
            desc.total_cost(),
            res.time.as_std().as_secs()
        );
    }

    if let Some(solution_path) = &job.solution {
        write_solution_file(solution_path, &desc)?;
    }

    Ok(RunSummary::new(
        &instance.name,
        seed_value,
        &desc,
        res.time.as_std().as_secs_f64(),
    ))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = argfile::expand_args_from(std::env::args_os(), parse_argfile, argfile::PREFIX)?;
    let args =
        ProgramArguments::from_arg_matches(&ProgramArguments::command().get_matches_from(args))?;
    info!("{:?}", &args);

    let seed_value = args.seed.unwrap_or_else(|| random::<i128>().abs());
    info!("seed: {}", seed_value);
    let params = args.solver.solver_parameters();

    let (fleet, jobs) = collect_jobs(&args)?;
    info!("fleet catalog with {} vehicle types", fleet.len());

    let mut summaries = Vec::with_capacity(jobs.len());
    for job in jobs.iter() {
        summaries.push(run(job, fleet.clone(), &args, &params, seed_value)?);
    }

    if let Some(summary_path) = &args.summary {
        write_summary_file(summary_path, &summaries)?;
        info!("summary written to {}", summary_path.display());
    }
    Ok(())
}
