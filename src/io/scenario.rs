use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

/// Batch of instances sharing one fleet catalog.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub fleet: PathBuf,
    pub solution_directory: Option<PathBuf>,
    #[serde(default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Deserialize)]
pub struct Run {
    pub instance: PathBuf,
    pub solution: Option<PathBuf>,
}

impl Scenario {
    /// Explicit solution path of the run, otherwise `<solution_directory>/<instance stem>.sol.csv`.
    pub fn solution_path(&self, run: &Run) -> Option<PathBuf> {
        run.solution.clone().or_else(|| {
            let directory = self.solution_directory.as_ref()?;
            let stem = run.instance.file_stem()?.to_string_lossy();
            Some(directory.join(format!("{}.sol.csv", stem)))
        })
    }

    /// Makes relative paths relative to `base`.
    fn resolve(&mut self, base: &Path) {
        let join = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        join(&mut self.fleet);
        if let Some(directory) = self.solution_directory.as_mut() {
            join(directory);
        }
        for run in self.runs.iter_mut() {
            join(&mut run.instance);
            if let Some(solution) = run.solution.as_mut() {
                join(solution);
            }
        }
    }
}

pub fn parse_scenario(s: &str) -> anyhow::Result<Scenario> {
    let scenario: Scenario = toml::from_str(s)?;
    if scenario.runs.is_empty() {
        bail!("scenario does not contain any run");
    }
    Ok(scenario)
}

/// Reads a scenario file; relative paths inside are taken relative to the file's directory.
pub fn load_scenario(path: impl AsRef<Path>) -> anyhow::Result<Scenario> {
    let path = path.as_ref();
    let mut s = String::new();
    File::open(path)
        .with_context(|| format!("cannot open scenario {}", path.display()))?
        .read_to_string(&mut s)?;
    let mut scenario =
        parse_scenario(s.as_str()).with_context(|| format!("reading scenario {}", path.display()))?;
    if let Some(base) = path.parent() {
        scenario.resolve(base);
    }
    Ok(scenario)
}
