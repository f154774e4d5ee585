use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::problem::fleet::VehicleType;
use crate::problem::instance::check_vehicle_type;
use crate::problem::Num;

#[derive(Debug, Deserialize)]
struct CsvVehicle {
    family: u32,
    max_capacity: Num,
    rental_cost: Num,
    fuel_cost: Num,
    radius_cost: Num,
    speed: Num,
    parking_time: Num,
    fourier_cos_0: Num,
    fourier_cos_1: Num,
    fourier_cos_2: Num,
    fourier_cos_3: Num,
    fourier_sin_0: Num,
    fourier_sin_1: Num,
    fourier_sin_2: Num,
    fourier_sin_3: Num,
}

impl From<CsvVehicle> for VehicleType {
    fn from(it: CsvVehicle) -> Self {
        VehicleType {
            family: it.family,
            capacity: it.max_capacity,
            rental_cost: it.rental_cost,
            fuel_cost: it.fuel_cost,
            radius_cost: it.radius_cost,
            speed: it.speed,
            parking_time: it.parking_time,
            fourier_cos: [
                it.fourier_cos_0,
                it.fourier_cos_1,
                it.fourier_cos_2,
                it.fourier_cos_3,
            ],
            fourier_sin: [
                it.fourier_sin_0,
                it.fourier_sin_1,
                it.fourier_sin_2,
                it.fourier_sin_3,
            ],
        }
    }
}

/// Reads the vehicle type catalog; the order of the rows is kept.
pub fn read_fleet<R: Read>(reader: R) -> anyhow::Result<Vec<VehicleType>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut fleet = Vec::new();
    for (idx, entry) in reader.deserialize::<CsvVehicle>().enumerate() {
        // the header is line 1
        let vehicle = VehicleType::from(entry.with_context(|| format!("vehicle row {}", idx + 2))?);
        check_vehicle_type(&vehicle).with_context(|| format!("vehicle row {}", idx + 2))?;
        fleet.push(vehicle);
    }
    if fleet.is_empty() {
        bail!("the fleet catalog does not contain any vehicle type");
    }
    Ok(fleet)
}

pub fn load_fleet(path: impl AsRef<Path>) -> anyhow::Result<Vec<VehicleType>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open fleet {}", path.display()))?;
    read_fleet(BufReader::new(file)).with_context(|| format!("reading fleet {}", path.display()))
}
