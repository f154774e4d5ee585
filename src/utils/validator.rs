use anyhow::{bail, Result};
use fixedbitset::FixedBitSet;

use crate::evaluation::cost::route_cost;
use crate::evaluation::simulator::{check_time_windows, TimeWindowCheck};
use crate::problem::instance::Instance;
use crate::problem::Num;
use crate::solution::{Route, Solution};
use crate::utils::Tolerance;

#[derive(Debug)]
pub enum Violation {
    EmptyRoute,
    UnknownVehicle(usize),
    Capacity(Num),
    TimeWindow { position: usize, lateness: Num },
}

#[derive(Debug)]
pub enum ValidatorResult {
    Valid(Num),
    ConstraintViolation(Violation),
    ObjectiveMismatch(Num),
}

impl ValidatorResult {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Valid(_) => true,
            _ => false,
        }
    }
}

/// Re-evaluates a route from scratch with its assigned vehicle type.
pub fn validate_route(instance: &Instance, route: &Route) -> ValidatorResult {
    use ValidatorResult::*;
    use Violation::*;

    if route.is_empty() {
        return ConstraintViolation(EmptyRoute);
    }
    if route.vehicle >= instance.num_vehicle_types() {
        return ConstraintViolation(UnknownVehicle(route.vehicle));
    }
    let vehicle = instance.vehicle(route.vehicle);

    let load = instance.load_of(&route.orders);
    if !vehicle.check_capacity(load) {
        return ConstraintViolation(Capacity(load - vehicle.capacity));
    }
    if let TimeWindowCheck::Violated { position, lateness } =
        check_time_windows(instance, &route.orders, vehicle)
    {
        return ConstraintViolation(TimeWindow { position, lateness });
    }

    let cost = route_cost(instance, &route.orders, vehicle);
    // also rejects NaN costs
    if !((cost - route.cost).abs() <= Num::tol()) {
        ObjectiveMismatch(cost)
    } else {
        Valid(cost)
    }
}

/// Checks every route and that each order is either routed or unassigned, exactly once.
///
/// Returns the recomputed total cost.
pub fn validate_solution(solution: &Solution) -> Result<Num> {
    let instance = solution.instance();
    let mut seen = FixedBitSet::with_capacity(instance.num_orders());
    let mut total_cost = 0.0;

    for (idx, route) in solution.routes.iter().enumerate() {
        match validate_route(instance, route) {
            ValidatorResult::Valid(cost) => total_cost += cost,
            ValidatorResult::ConstraintViolation(violation) => {
                bail!("route {} {:?}: {:?}", idx, route.orders, violation)
            }
            ValidatorResult::ObjectiveMismatch(cost) => bail!(
                "route {} {:?}: stored cost {} but recomputed {}",
                idx,
                route.orders,
                route.cost,
                cost
            ),
        }
        for &order in route.orders.iter() {
            if order >= instance.num_orders() {
                bail!("route {}: unknown order index {}", idx, order);
            }
            if seen.put(order) {
                bail!("order {} is visited twice", instance.order(order).oid);
            }
        }
    }
    for &order in solution.unassigned.iter() {
        if order >= instance.num_orders() {
            bail!("unknown unassigned order index {}", order);
        }
        if seen.put(order) {
            bail!(
                "order {} is both unassigned and routed",
                instance.order(order).oid
            );
        }
    }

    if let Some(missing) = (0..instance.num_orders()).find(|&order| !seen.contains(order)) {
        bail!(
            "{} orders are neither routed nor unassigned (first: {})",
            instance.num_orders() - seen.count_ones(..),
            instance.order(missing).oid
        );
    }
    if !((total_cost - solution.total_cost()).abs() <= Num::tol()) {
        bail!(
            "total cost mismatch: stored {} but recomputed {}",
            solution.total_cost(),
            total_cost
        );
    }
    Ok(total_cost)
}

#[cfg(any(test, feature = "search_assertions"))]
pub fn assert_valid_solution(solution: &Solution) {
    if let Err(e) = validate_solution(solution) {
        panic!("invalid solution: {}", e)
    }
}
