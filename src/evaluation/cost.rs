use itertools::Itertools;

use crate::problem::fleet::VehicleType;
use crate::problem::instance::Instance;
use crate::problem::{Num, OrderId};

/// Taxicab length of the closed tour depot -> orders -> depot.
pub fn route_distance(instance: &Instance, orders: &[OrderId]) -> Num {
    if orders.is_empty() {
        return 0.0;
    }
    let depot = &instance.depot.location;
    let first = &instance.order(orders[0]).location;
    let last = &instance.order(orders[orders.len() - 1]).location;

    depot.taxicab(first)
        + orders
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| instance.order(a).location.taxicab(&instance.order(b).location))
            .sum::<Num>()
        + last.taxicab(depot)
}

/// Largest squared straight-line distance between any two orders of the route.
pub fn max_squared_spread(instance: &Instance, orders: &[OrderId]) -> Num {
    orders
        .iter()
        .tuple_combinations()
        .map(|(&a, &b)| {
            instance
                .order(a)
                .location
                .squared_euclidean(&instance.order(b).location)
        })
        .fold(0.0, Num::max)
}

/// Monetary cost of serving `orders` with `vehicle`. Feasibility is not checked here.
pub fn route_cost(instance: &Instance, orders: &[OrderId], vehicle: &VehicleType) -> Num {
    if orders.is_empty() {
        return 0.0;
    }
    vehicle.rental_cost
        + vehicle.fuel_cost * route_distance(instance, orders)
        + vehicle.radius_cost * max_squared_spread(instance, orders)
}

#[cfg(test)]
mod tests {
    use crate::problem::fleet::tests::constant_vehicle;
    use crate::problem::instance::tests::{order_at, planar_instance};

    use super::*;

    #[test]
    fn empty_route_costs_nothing() {
        let instance = planar_instance(vec![], vec![constant_vehicle(1, 10.0, 10.0)]);
        assert_eq!(route_cost(&instance, &[], instance.vehicle(0)), 0.0);
    }

    #[test]
    fn rental_fuel_and_radius() {
        let mut vehicle = constant_vehicle(1, 10.0, 10.0);
        vehicle.rental_cost = 50.0;
        vehicle.fuel_cost = 2.0;
        vehicle.radius_cost = 0.5;
        let instance = planar_instance(
            vec![
                order_at(3.0, 4.0, 1.0, 0.0, 100.0),
                order_at(-3.0, 4.0, 1.0, 0.0, 100.0),
                order_at(0.0, -2.0, 1.0, 0.0, 100.0),
            ],
            vec![vehicle],
        );
        let route = [0, 1, 2];
        // 7 + 6 + 9 + 2
        assert_eq!(route_distance(&instance, &route), 24.0);
        // (3,4)-(0,-2) and (-3,4)-(0,-2) are both 9 + 36 apart
        assert_eq!(max_squared_spread(&instance, &route), 45.0);
        assert_eq!(
            route_cost(&instance, &route, instance.vehicle(0)),
            50.0 + 2.0 * 24.0 + 0.5 * 45.0
        );
    }

    #[test]
    fn spread_ignores_visit_order_and_distance_does_not() {
        let instance = planar_instance(
            vec![
                order_at(10.0, 0.0, 1.0, 0.0, 100.0),
                order_at(0.0, 10.0, 1.0, 0.0, 100.0),
                order_at(10.0, 10.0, 1.0, 0.0, 100.0),
            ],
            vec![constant_vehicle(1, 10.0, 10.0)],
        );
        assert_eq!(
            max_squared_spread(&instance, &[0, 1, 2]),
            max_squared_spread(&instance, &[2, 0, 1])
        );
        assert!(route_distance(&instance, &[0, 1, 2]) > route_distance(&instance, &[0, 2, 1]));
    }

    #[test]
    fn single_order_has_no_spread() {
        let instance = planar_instance(
            vec![order_at(10.0, 5.0, 1.0, 0.0, 100.0)],
            vec![constant_vehicle(1, 10.0, 10.0)],
        );
        assert_eq!(max_squared_spread(&instance, &[0]), 0.0);
        assert_eq!(route_distance(&instance, &[0]), 30.0);
        let c = route_cost(&instance, &[0], instance.vehicle(0));
        assert_eq!(c, route_cost(&instance, &[0], instance.vehicle(0)));
        assert_eq!(c, 130.0);
    }
}
