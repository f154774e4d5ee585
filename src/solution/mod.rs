use log::trace;

use crate::evaluation::{best_vehicle, BestVehicle};
use crate::problem::instance::Instance;
use crate::problem::{Num, OrderId, VehicleTypeId};
use crate::utils::Tolerance;
pub use crate::solution::description::{RouteDescription, SolutionDescription};

mod description;
pub mod permutation;

/// Visit sequence together with the vehicle type admitted for it.
#[derive(Clone, Debug)]
pub struct Route {
    pub orders: Vec<OrderId>,
    pub vehicle: VehicleTypeId,
    pub cost: Num,
}

impl Route {
    /// Builds a route if some vehicle type can serve `orders`.
    pub fn with_orders(instance: &Instance, orders: Vec<OrderId>) -> Option<Self> {
        match best_vehicle(instance, &orders) {
            BestVehicle::Some(vehicle, cost) => Some(Self {
                orders,
                vehicle,
                cost,
            }),
            BestVehicle::None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Re-runs the vehicle selection on the current sequence.
    ///
    /// Returns `false` (and leaves the route untouched) if the sequence has become inadmissible.
    pub fn refresh_vehicle(&mut self, instance: &Instance) -> bool {
        match best_vehicle(instance, &self.orders) {
            BestVehicle::Some(vehicle, cost) => {
                if vehicle != self.vehicle {
                    trace!(
                        "route {:?}: vehicle type {} -> {}",
                        self.orders,
                        self.vehicle,
                        vehicle
                    );
                }
                self.vehicle = vehicle;
                self.cost = cost;
                true
            }
            BestVehicle::None => false,
        }
    }
}

#[derive(Clone)]
pub struct Solution<'a> {
    pub(crate) instance: &'a Instance,
    pub routes: Vec<Route>,
    /// orders that no vehicle type can serve
    pub unassigned: Vec<OrderId>,
}

impl<'a> Solution<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            routes: Vec::new(),
            unassigned: Vec::new(),
        }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn push_route(&mut self, route: Route) {
        debug_assert!(!route.is_empty());
        self.routes.push(route);
    }

    pub fn track_order_unassigned(&mut self, order: OrderId) {
        self.unassigned.push(order);
    }

    pub fn total_cost(&self) -> Num {
        self.routes.iter().map(|it| it.cost).sum()
    }

    pub fn number_of_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn number_of_unassigned_orders(&self) -> usize {
        self.unassigned.len()
    }

    pub fn number_of_assigned_orders(&self) -> usize {
        self.routes.iter().map(|it| it.len()).sum()
    }

    /// Fewer unassigned orders first, then lower total cost.
    pub fn is_better_than(&self, other: &Solution) -> bool {
        self.number_of_unassigned_orders() < other.number_of_unassigned_orders()
            || (self.number_of_unassigned_orders() == other.number_of_unassigned_orders()
                && self.total_cost() < other.total_cost() - Num::tol())
    }

    pub fn to_description(&self) -> SolutionDescription {
        SolutionDescription {
            routes: self
                .routes
                .iter()
                .map(|route| RouteDescription {
                    family: self.instance.vehicle(route.vehicle).family,
                    orders: route
                        .orders
                        .iter()
                        .map(|&id| self.instance.order(id).oid)
                        .collect(),
                    cost: route.cost,
                })
                .collect(),
            unassigned_orders: self
                .unassigned
                .iter()
                .map(|&id| self.instance.order(id).oid)
                .collect(),
            total_cost: self.total_cost(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::problem::fleet::tests::constant_vehicle;
    use crate::problem::instance::tests::{order_at, planar_instance};

    use super::*;

    #[test]
    fn route_admission_and_refresh() {
        let mut cheap = constant_vehicle(2, 5.0, 10.0);
        cheap.rental_cost = 10.0;
        let instance = planar_instance(
            vec![
                order_at(100.0, 0.0, 4.0, 0.0, 1000.0),
                order_at(200.0, 0.0, 4.0, 0.0, 1000.0),
            ],
            vec![constant_vehicle(1, 10.0, 10.0), cheap],
        );
        let mut route = Route::with_orders(&instance, vec![0, 1]).unwrap();
        assert_eq!(route.vehicle, 0);
        assert_eq!(route.cost, 500.0);

        route.orders.pop();
        assert!(route.refresh_vehicle(&instance));
        assert_eq!(route.vehicle, 1);
        assert_eq!(route.cost, 210.0);
    }

    #[test]
    fn description_uses_original_ids() {
        let instance = planar_instance(
            vec![
                order_at(100.0, 0.0, 1.0, 0.0, 1000.0),
                order_at(200.0, 0.0, 1.0, 0.0, 1000.0),
                order_at(300.0, 0.0, 100.0, 0.0, 1000.0),
            ],
            vec![constant_vehicle(9, 10.0, 10.0)],
        );
        let mut solution = Solution::new(&instance);
        solution.push_route(Route::with_orders(&instance, vec![1, 0]).unwrap());
        solution.track_order_unassigned(2);

        let desc = solution.to_description();
        assert_eq!(desc.number_of_routes(), 1);
        assert_eq!(desc.routes()[0].family, 9);
        assert_eq!(desc.routes()[0].orders, vec![101, 100]);
        assert_eq!(desc.unassigned_orders(), &[102]);
        assert_eq!(desc.total_cost(), solution.total_cost());
        assert_eq!(desc.get_summary_string(), "1/1/500.000");
    }

    #[test]
    fn better_solutions_serve_more_orders_first() {
        let instance = planar_instance(
            vec![
                order_at(100.0, 0.0, 1.0, 0.0, 1000.0),
                order_at(200.0, 0.0, 1.0, 0.0, 1000.0),
            ],
            vec![constant_vehicle(1, 10.0, 10.0)],
        );
        let mut cheap = Solution::new(&instance);
        cheap.push_route(Route::with_orders(&instance, vec![0]).unwrap());
        cheap.track_order_unassigned(1);

        let mut complete = Solution::new(&instance);
        complete.push_route(Route::with_orders(&instance, vec![0, 1]).unwrap());

        assert!(complete.is_better_than(&cheap));
        assert!(!cheap.is_better_than(&complete));
        assert!(!complete.is_better_than(&complete.clone()));

        let mut marginal = complete.clone();
        marginal.routes[0].cost -= Num::tol() / 2.0;
        assert!(!marginal.is_better_than(&complete));
        marginal.routes[0].cost -= Num::tol();
        assert!(marginal.is_better_than(&complete));
    }
}
