use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::problem::Num;
use crate::solution::SolutionDescription;

/// Outcome of one solved instance.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub instance: String,
    pub seed: i128,
    pub routes: usize,
    pub unassigned: usize,
    pub total_cost: Num,
    pub seconds: f64,
    pub solution: SolutionDescription,
}

impl RunSummary {
    pub fn new(instance: &str, seed: i128, desc: &SolutionDescription, seconds: f64) -> Self {
        Self {
            instance: instance.to_string(),
            seed,
            routes: desc.number_of_routes(),
            unassigned: desc.number_of_unassigned_orders(),
            total_cost: desc.total_cost(),
            seconds,
            solution: desc.clone(),
        }
    }
}

pub fn write_summary<W: Write>(writer: W, runs: &[RunSummary]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, runs)?;
    Ok(())
}

pub fn write_summary_file(path: impl AsRef<Path>, runs: &[RunSummary]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("cannot create summary {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_summary(&mut writer, runs)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::problem::fleet::tests::constant_vehicle;
    use crate::problem::instance::tests::{order_at, planar_instance};
    use crate::solution::{Route, Solution};

    use super::*;

    #[test]
    fn one_object_per_run() -> anyhow::Result<()> {
        let instance = planar_instance(
            vec![order_at(100.0, 0.0, 1.0, 0.0, 1e6)],
            vec![constant_vehicle(1, 5.0, 10.0)],
        );
        let mut solution = Solution::new(&instance);
        solution.push_route(Route::with_orders(&instance, vec![0]).unwrap());
        let summary = RunSummary::new("instance_01", 7, &solution.to_description(), 0.5);

        let mut out = Vec::new();
        write_summary(&mut out, &[summary])?;
        let value: serde_json::Value = serde_json::from_slice(&out)?;

        assert_eq!(value.as_array().map(|it| it.len()), Some(1));
        assert_eq!(value[0]["instance"], "instance_01");
        assert_eq!(value[0]["routes"], 1);
        assert_eq!(value[0]["unassigned"], 0);
        assert_eq!(value[0]["total_cost"], 300.0);
        let route = &value[0]["solution"]["routes"][0];
        assert_eq!(route["family"], 1);
        assert_eq!(route["orders"], serde_json::json!([100]));
        assert_eq!(route["cost"], 300.0);
        assert_eq!(value[0]["solution"]["unassigned_orders"], serde_json::json!([]));
        Ok(())
    }
}
