use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::solution::SolutionDescription;

/// Writes one row per route: the vehicle family followed by the order ids in visiting order,
/// padded with empty fields up to the longest route.
pub fn write_solution<W: Write>(writer: W, desc: &SolutionDescription) -> anyhow::Result<()> {
    let width = desc.longest_route();
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(width + 1);
    header.push("family".to_string());
    header.extend((1..=width).map(|i| format!("order_{}", i)));
    writer.write_record(&header)?;

    let mut record = Vec::with_capacity(width + 1);
    for route in desc.routes() {
        record.clear();
        record.push(route.family.to_string());
        record.extend(route.orders.iter().map(|oid| oid.to_string()));
        record.resize(width + 1, String::new());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_solution_file(path: impl AsRef<Path>, desc: &SolutionDescription) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|it| !it.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("cannot create solution {}", path.display()))?;
    write_solution(file, desc).with_context(|| format!("writing solution {}", path.display()))?;
    info!("solution written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::problem::fleet::tests::constant_vehicle;
    use crate::problem::instance::tests::{order_at, planar_instance};
    use crate::solution::{Route, Solution};

    use super::*;

    #[test]
    fn pads_short_routes() -> anyhow::Result<()> {
        let mut large = constant_vehicle(2, 10.0, 10.0);
        large.rental_cost = 150.0;
        let instance = planar_instance(
            (0..4)
                .map(|i| order_at(100.0 * (i + 1) as f64, 0.0, 3.0, 0.0, 1e6))
                .collect(),
            vec![constant_vehicle(1, 5.0, 10.0), large],
        );
        let mut solution = Solution::new(&instance);
        solution.push_route(Route::with_orders(&instance, vec![2, 0, 1]).unwrap());
        solution.push_route(Route::with_orders(&instance, vec![3]).unwrap());

        let mut out = Vec::new();
        write_solution(&mut out, &solution.to_description())?;
        let text = String::from_utf8(out)?;

        itertools::assert_equal(
            text.lines(),
            ["family,order_1,order_2,order_3", "2,102,100,101", "1,103,,"],
        );
        Ok(())
    }

    #[test]
    fn empty_solution_has_only_a_header() -> anyhow::Result<()> {
        let instance = planar_instance(vec![], vec![constant_vehicle(1, 5.0, 10.0)]);
        let mut out = Vec::new();
        write_solution(&mut out, &Solution::new(&instance).to_description())?;
        assert_eq!(String::from_utf8(out)?, "family\n");
        Ok(())
    }
}
