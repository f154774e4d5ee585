use std::fmt::{Debug, Formatter};

use anyhow::{bail, Result};
use log::debug;

use crate::problem::fleet::VehicleType;
use crate::problem::geo::{project, LatLon, Point};
use crate::problem::{Num, OrderId, VehicleTypeId};

#[derive(Clone, Debug)]
pub struct Depot {
    pub oid: u64,
    pub location: Point,
}

#[derive(Clone, Debug)]
pub struct Order {
    /// dense index, equal to the position in `Instance::orders`
    pub id: OrderId,
    /// identifier in the input data
    pub oid: u64,
    pub location: Point,
    pub weight: Num,
    pub tmin: Num,
    pub tmax: Num,
    pub service: Num,
}

/// Order as read from the input, still in geographic coordinates.
#[derive(Clone, Debug)]
pub struct OrderData {
    pub oid: u64,
    pub coord: LatLon,
    pub weight: Num,
    pub tmin: Num,
    pub tmax: Num,
    pub service: Num,
}

pub struct Instance {
    pub name: String,
    pub depot: Depot,
    pub orders: Vec<Order>,
    pub fleet: Vec<VehicleType>,
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "instance {}:", self.name)
            .and(writeln!(f, "depot: {:?}", self.depot))
            .and(writeln!(
                f,
                "{} vehicle types: {:?}",
                self.fleet.len(),
                self.fleet
            ))
            .and(write!(f, "{} orders: {:?}", self.orders.len(), self.orders))
    }
}

impl Instance {
    pub fn num_orders(&self) -> usize {
        self.orders.len()
    }
    pub fn num_vehicle_types(&self) -> usize {
        self.fleet.len()
    }
    #[inline(always)]
    pub fn order(&self, id: OrderId) -> &Order {
        &self.orders[id]
    }
    #[inline(always)]
    pub fn vehicle(&self, id: VehicleTypeId) -> &VehicleType {
        &self.fleet[id]
    }
    pub fn iter_order_ids(&self) -> impl Iterator<Item = OrderId> {
        0..self.orders.len()
    }
    pub fn load_of(&self, orders: &[OrderId]) -> Num {
        orders.iter().map(|&id| self.orders[id].weight).sum()
    }

    /// Builds an instance from coordinates that are already planar.
    ///
    /// Order ids are reassigned to match their position. Fails on data that no route could ever
    /// be built from (non-positive weights, inverted windows, empty fleet, ...).
    pub fn from_parts(
        name: impl Into<String>,
        depot: Depot,
        mut orders: Vec<Order>,
        fleet: Vec<VehicleType>,
    ) -> Result<Self> {
        if fleet.is_empty() {
            bail!("the fleet catalog does not contain any vehicle type");
        }
        for vehicle in fleet.iter() {
            check_vehicle_type(vehicle)?;
        }
        if !depot.location.is_finite() {
            bail!("depot {}: location must be finite (got {:?})", depot.oid, depot.location);
        }
        for (idx, order) in orders.iter_mut().enumerate() {
            order.id = idx;
            check_order(order)?;
        }

        Ok(Self {
            name: name.into(),
            depot,
            orders,
            fleet,
        })
    }
}

fn check_order(order: &Order) -> Result<()> {
    if !order.location.is_finite() {
        bail!("order {}: location must be finite (got {:?})", order.oid, order.location);
    }
    if !(order.weight.is_finite() && order.weight > 0.0) {
        bail!("order {}: weight must be positive (got {})", order.oid, order.weight);
    }
    if !(order.tmin.is_finite() && order.tmax.is_finite()) {
        bail!("order {}: time window must be finite", order.oid);
    }
    if order.tmin > order.tmax {
        bail!(
            "order {}: window start {} is after window end {}",
            order.oid,
            order.tmin,
            order.tmax
        );
    }
    if !(order.service.is_finite() && order.service >= 0.0) {
        bail!(
            "order {}: service duration must be non-negative (got {})",
            order.oid,
            order.service
        );
    }
    Ok(())
}

pub(crate) fn check_vehicle_type(vehicle: &VehicleType) -> Result<()> {
    let family = vehicle.family;
    if !(vehicle.speed.is_finite() && vehicle.speed > 0.0) {
        bail!("vehicle family {}: speed must be positive (got {})", family, vehicle.speed);
    }
    if !(vehicle.capacity.is_finite() && vehicle.capacity > 0.0) {
        bail!(
            "vehicle family {}: capacity must be positive (got {})",
            family,
            vehicle.capacity
        );
    }
    let non_negative = [
        ("rental cost", vehicle.rental_cost),
        ("fuel cost", vehicle.fuel_cost),
        ("radius cost", vehicle.radius_cost),
        ("parking time", vehicle.parking_time),
    ];
    for (what, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            bail!("vehicle family {}: {} must be non-negative (got {})", family, what, value);
        }
    }
    if vehicle
        .fourier_cos
        .iter()
        .chain(vehicle.fourier_sin.iter())
        .any(|it| !it.is_finite())
    {
        bail!("vehicle family {}: fourier coefficients must be finite", family);
    }
    Ok(())
}

/// Projects all stops around the depot latitude and builds the instance.
pub fn create_instance_with(
    name: impl Into<String>,
    depot_oid: u64,
    depot_coord: LatLon,
    orders: Vec<OrderData>,
    fleet: Vec<VehicleType>,
) -> Result<Instance> {
    if !depot_coord.is_finite() {
        bail!("depot {}: coordinates must be finite (got {:?})", depot_oid, depot_coord);
    }
    if let Some(order) = orders.iter().find(|it| !it.coord.is_finite()) {
        bail!("order {}: coordinates must be finite (got {:?})", order.oid, order.coord);
    }
    let reference_latitude = depot_coord.lat;
    debug!("projecting around reference latitude {}", reference_latitude);

    let depot = Depot {
        oid: depot_oid,
        location: project(depot_coord, reference_latitude),
    };
    let orders = orders
        .into_iter()
        .enumerate()
        .map(|(id, data)| Order {
            id,
            oid: data.oid,
            location: project(data.coord, reference_latitude),
            weight: data.weight,
            tmin: data.tmin,
            tmax: data.tmax,
            service: data.service,
        })
        .collect();

    Instance::from_parts(name, depot, orders, fleet)
}
