use crate::problem::fleet::VehicleType;
use crate::problem::instance::Instance;
use crate::problem::{Num, OrderId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeWindowCheck {
    /// time at which the service of the last order is completed
    Feasible { completion: Num },
    /// the order at `position` is reached `lateness` after its window closed
    Violated { position: usize, lateness: Num },
}

impl TimeWindowCheck {
    pub fn is_feasible(&self) -> bool {
        match self {
            Self::Feasible { .. } => true,
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Visit {
    pub order: OrderId,
    pub arrival: Num,
    pub service_start: Num,
    pub departure: Num,
}

/// Walks the route forward from the depot at `t = 0`.
///
/// Every visit is reported to `on_visit`; the walk stops at the first violated time window.
fn walk(
    instance: &Instance,
    orders: &[OrderId],
    vehicle: &VehicleType,
    mut on_visit: impl FnMut(Visit),
) -> TimeWindowCheck {
    let mut t: Num = 0.0;
    let mut prev = &instance.depot.location;
    for (position, &id) in orders.iter().enumerate() {
        let order = instance.order(id);
        let arrival = t + vehicle.travel_time(prev, &order.location, t);
        let service_start = arrival.max(order.tmin);
        if service_start > order.tmax {
            return TimeWindowCheck::Violated {
                position,
                lateness: service_start - order.tmax,
            };
        }
        t = service_start + order.service;
        on_visit(Visit {
            order: id,
            arrival,
            service_start,
            departure: t,
        });
        prev = &order.location;
    }
    TimeWindowCheck::Feasible { completion: t }
}

pub fn check_time_windows(
    instance: &Instance,
    orders: &[OrderId],
    vehicle: &VehicleType,
) -> TimeWindowCheck {
    walk(instance, orders, vehicle, |_| {})
}

pub fn is_feasible(instance: &Instance, orders: &[OrderId], vehicle: &VehicleType) -> bool {
    check_time_windows(instance, orders, vehicle).is_feasible()
}

/// Visit times of a time-feasible route, `None` if some window is violated.
pub fn schedule(
    instance: &Instance,
    orders: &[OrderId],
    vehicle: &VehicleType,
) -> Option<Vec<Visit>> {
    let mut visits = Vec::with_capacity(orders.len());
    match walk(instance, orders, vehicle, |visit| visits.push(visit)) {
        TimeWindowCheck::Feasible { .. } => Some(visits),
        TimeWindowCheck::Violated { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::problem::fleet::tests::constant_vehicle;
    use crate::problem::instance::tests::{order_at, planar_instance};

    use super::*;

    #[test]
    fn empty_route_is_feasible() {
        let instance = planar_instance(vec![], vec![constant_vehicle(1, 10.0, 10.0)]);
        assert_eq!(
            check_time_windows(&instance, &[], instance.vehicle(0)),
            TimeWindowCheck::Feasible { completion: 0.0 }
        );
    }

    #[test]
    fn waits_for_window_opening() {
        let mut first = order_at(100.0, 0.0, 1.0, 50.0, 60.0);
        first.service = 5.0;
        let instance = planar_instance(
            vec![first, order_at(200.0, 0.0, 1.0, 0.0, 100.0)],
            vec![constant_vehicle(1, 10.0, 10.0)],
        );
        let visits = schedule(&instance, &[0, 1], instance.vehicle(0)).unwrap();
        // arrive at 10, wait until 50, serve until 55, drive 10 more seconds
        assert_eq!(visits[0].arrival, 10.0);
        assert_eq!(visits[0].service_start, 50.0);
        assert_eq!(visits[0].departure, 55.0);
        assert_eq!(visits[1].arrival, 65.0);
        assert_eq!(
            check_time_windows(&instance, &[0, 1], instance.vehicle(0)),
            TimeWindowCheck::Feasible { completion: 65.0 }
        );
    }

    #[test]
    fn reports_first_violation() {
        let instance = planar_instance(
            vec![
                order_at(100.0, 0.0, 1.0, 0.0, 1000.0),
                order_at(1000.0, 0.0, 1.0, 0.0, 50.0),
                order_at(0.0, 10.0, 1.0, 0.0, 0.0),
            ],
            vec![constant_vehicle(1, 10.0, 10.0)],
        );
        match check_time_windows(&instance, &[0, 1, 2], instance.vehicle(0)) {
            TimeWindowCheck::Violated { position, lateness } => {
                assert_eq!(position, 1);
                assert_eq!(lateness, 50.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(schedule(&instance, &[0, 1, 2], instance.vehicle(0)).is_none());
    }

    #[test]
    fn order_matters() {
        // reachable in the given order only
        let instance = planar_instance(
            vec![
                order_at(100.0, 0.0, 1.0, 0.0, 15.0),
                order_at(200.0, 0.0, 1.0, 0.0, 1000.0),
            ],
            vec![constant_vehicle(1, 10.0, 10.0)],
        );
        assert!(is_feasible(&instance, &[0, 1], instance.vehicle(0)));
        assert!(!is_feasible(&instance, &[1, 0], instance.vehicle(0)));
    }

    #[test]
    fn arrivals_are_monotone_and_within_windows() {
        let mut vehicle = constant_vehicle(1, 100.0, 5.0);
        vehicle.fourier_cos = [1.0, 0.3, -0.2, 0.1];
        vehicle.fourier_sin = [0.0, 0.2, 0.1, -0.05];
        vehicle.parking_time = 120.0;
        let orders = (0..8)
            .map(|i| {
                let mut order = order_at(
                    (i as Num * 731.0) % 2000.0,
                    (i as Num * 173.0) % 900.0,
                    1.0,
                    i as Num * 300.0,
                    1e6,
                );
                order.service = 30.0 + i as Num;
                order
            })
            .collect();
        let instance = planar_instance(orders, vec![vehicle]);
        let route: Vec<OrderId> = (0..8).collect();
        let visits = schedule(&instance, &route, instance.vehicle(0)).unwrap();
        assert_eq!(visits.len(), 8);
        let mut last = 0.0;
        for visit in visits.iter() {
            let order = instance.order(visit.order);
            assert!(visit.arrival >= last);
            assert!(visit.service_start >= visit.arrival);
            assert!(order.tmin <= visit.service_start && visit.service_start <= order.tmax);
            last = visit.departure;
        }
    }
}
