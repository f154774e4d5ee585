use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::warn;

use crate::evaluation::cost::route_cost;
use crate::evaluation::simulator::is_feasible;
use crate::problem::instance::Instance;
use crate::problem::{Num, OrderId, VehicleTypeId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BestVehicle {
    Some(VehicleTypeId, Num),
    None,
}

impl BestVehicle {
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            _ => false,
        }
    }
}

/// Cheapest vehicle type that can serve `orders` within capacity and all time windows.
///
/// Ties are resolved in favour of the type listed first in the catalog.
pub fn best_vehicle(instance: &Instance, orders: &[OrderId]) -> BestVehicle {
    let load = instance.load_of(orders);
    let mut best = BestVehicle::None;
    for (v_id, vehicle) in instance.fleet.iter().enumerate() {
        if !vehicle.check_capacity(load) || !is_feasible(instance, orders, vehicle) {
            continue;
        }
        let cost = route_cost(instance, orders, vehicle);
        let replace = match best {
            BestVehicle::None => true,
            BestVehicle::Some(_, best_cost) => cost < best_cost,
        };
        if replace {
            best = BestVehicle::Some(v_id, cost);
        }
    }
    best
}

/// Orders no vehicle type can serve even when they are the only stop of a route.
pub fn find_unroutable_orders(instance: &Instance) -> Vec<OrderId> {
    instance
        .iter_order_ids()
        .filter(|&id| best_vehicle(instance, &[id]).is_none())
        .collect()
}

#[derive(Debug)]
pub struct UnroutableOrders {
    /// original order identifiers
    pub oids: Vec<u64>,
}

impl UnroutableOrders {
    pub fn check(instance: &Instance) -> Result<(), UnroutableOrders> {
        let unroutable = find_unroutable_orders(instance);
        if unroutable.is_empty() {
            Ok(())
        } else {
            for &id in unroutable.iter() {
                let order = instance.order(id);
                warn!(
                    "order {} (weight: {}, window: [{}, {}]) cannot be served by any vehicle type",
                    order.oid, order.weight, order.tmin, order.tmax
                );
            }
            Err(UnroutableOrders {
                oids: unroutable.iter().map(|&id| instance.order(id).oid).collect(),
            })
        }
    }
}

impl Display for UnroutableOrders {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} order(s) cannot be served by any vehicle type: {}",
            self.oids.len(),
            self.oids.iter().join(", ")
        )
    }
}

impl std::error::Error for UnroutableOrders {}
