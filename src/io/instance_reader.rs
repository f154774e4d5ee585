use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ahash::AHashSet;
use anyhow::{bail, Context};
use log::info;
use serde::Deserialize;

use crate::problem::fleet::VehicleType;
use crate::problem::geo::LatLon;
use crate::problem::instance::{create_instance_with, Instance, OrderData};
use crate::problem::Num;

/// A row of the instance file; the depot is the row without an order weight.
#[derive(Debug, Deserialize)]
struct CsvStop {
    id: u64,
    latitude: Num,
    longitude: Num,
    order_weight: Option<Num>,
    window_start: Option<Num>,
    window_end: Option<Num>,
    delivery_duration: Option<Num>,
}

#[derive(Debug)]
pub struct InstanceElements {
    pub depot_oid: u64,
    pub depot_coord: LatLon,
    pub orders: Vec<OrderData>,
}

fn required(value: Option<Num>, column: &str, id: u64) -> anyhow::Result<Num> {
    value.with_context(|| format!("order {}: missing {}", id, column))
}

pub fn read_instance<R: Read>(reader: R) -> anyhow::Result<InstanceElements> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut depot: Option<(u64, LatLon)> = None;
    let mut orders = Vec::new();
    let mut ids = AHashSet::new();

    for (idx, entry) in reader.deserialize::<CsvStop>().enumerate() {
        let row = idx + 2;
        let stop = entry.with_context(|| format!("instance row {}", row))?;
        let coord = LatLon {
            lat: stop.latitude,
            lon: stop.longitude,
        };

        match stop.order_weight {
            None => {
                if let Some((oid, _)) = depot {
                    bail!("instance row {}: second depot {} (first: {})", row, stop.id, oid);
                }
                depot = Some((stop.id, coord));
            }
            Some(weight) => {
                if !ids.insert(stop.id) {
                    bail!("instance row {}: duplicate order id {}", row, stop.id);
                }
                let order = OrderData {
                    oid: stop.id,
                    coord,
                    weight,
                    tmin: required(stop.window_start, "window_start", stop.id)?,
                    tmax: required(stop.window_end, "window_end", stop.id)?,
                    service: required(stop.delivery_duration, "delivery_duration", stop.id)?,
                };
                orders.push(order);
            }
        }
    }

    match depot {
        Some((depot_oid, depot_coord)) => Ok(InstanceElements {
            depot_oid,
            depot_coord,
            orders,
        }),
        None => bail!("no depot (row without order_weight) found"),
    }
}

/// Reads an instance file and builds the instance against the given fleet catalog.
pub fn load_instance(path: impl AsRef<Path>, fleet: Vec<VehicleType>) -> anyhow::Result<Instance> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("cannot open instance {}", path.display()))?;
    let InstanceElements {
        depot_oid,
        depot_coord,
        orders,
    } = read_instance(BufReader::new(file))
        .with_context(|| format!("reading instance {}", path.display()))?;

    let name = path
        .file_stem()
        .map(|it| it.to_string_lossy().to_string())
        .unwrap_or_default();
    info!("instance {}: {} orders", name, orders.len());

    create_instance_with(name, depot_oid, depot_coord, orders, fleet)
        .with_context(|| format!("invalid instance {}", path.display()))
}
