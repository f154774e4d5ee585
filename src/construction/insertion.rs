//! Sequential best-insertion: routes are grown one at a time, starting from the most urgent order.

use log::{trace, warn};
use rand::Rng;

use crate::evaluation::{best_vehicle, BestVehicle};
use crate::problem::instance::Instance;
use crate::problem::{Num, OrderId, VehicleTypeId};
use crate::solution::{Route, Solution};
use crate::utils::Random;

#[derive(Clone, Copy, Debug)]
struct Insertion {
    /// index into the list of remaining orders
    remaining_idx: usize,
    position: usize,
    vehicle: VehicleTypeId,
    cost: Num,
}

pub struct SequentialInsertion<'a> {
    pub instance: &'a Instance,
    max_capacity: Num,
}

impl<'a> SequentialInsertion<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            max_capacity: instance
                .fleet
                .iter()
                .map(|it| it.capacity)
                .fold(0.0, Num::max),
        }
    }

    /// All orders by ascending deadline; equal deadlines are ordered by a random key.
    pub(crate) fn orders_by_urgency(&self, rng: &mut Random) -> Vec<OrderId> {
        let mut keyed: Vec<(OrderId, u64)> = self
            .instance
            .iter_order_ids()
            .map(|id| (id, rng.gen::<u64>()))
            .collect();
        keyed.sort_by(|(a, key_a), (b, key_b)| {
            self.instance
                .order(*a)
                .tmax
                .total_cmp(&self.instance.order(*b).tmax)
                .then(key_a.cmp(key_b))
        });
        keyed.into_iter().map(|(id, _)| id).collect()
    }

    /// Cheapest admissible insertion of any remaining order at any position of `route`.
    fn find_best_insertion(&self, route: &Route, remaining: &[OrderId]) -> Option<Insertion> {
        let load = self.instance.load_of(&route.orders);
        let mut candidate = Vec::with_capacity(route.len() + 1);
        let mut best: Option<Insertion> = None;

        for (remaining_idx, &order) in remaining.iter().enumerate() {
            if load + self.instance.order(order).weight > self.max_capacity {
                continue;
            }
            for position in 0..=route.len() {
                candidate.clear();
                candidate.extend_from_slice(&route.orders[..position]);
                candidate.push(order);
                candidate.extend_from_slice(&route.orders[position..]);

                if let BestVehicle::Some(vehicle, cost) = best_vehicle(self.instance, &candidate) {
                    if best.map_or(true, |it| cost < it.cost) {
                        best = Some(Insertion {
                            remaining_idx,
                            position,
                            vehicle,
                            cost,
                        });
                    }
                }
            }
        }
        best
    }

    pub fn construct<'b>(&self, rng: &mut Random) -> Solution<'b>
    where
        'a: 'b,
    {
        let mut solution = Solution::new(self.instance);
        let mut remaining = self.orders_by_urgency(rng);

        while !remaining.is_empty() {
            let first = remaining.remove(0);
            let mut route = match Route::with_orders(self.instance, vec![first]) {
                Some(route) => route,
                None => {
                    warn!(
                        "order {} cannot be served by any vehicle type - left unassigned",
                        self.instance.order(first).oid
                    );
                    solution.track_order_unassigned(first);
                    continue;
                }
            };

            while let Some(ins) = self.find_best_insertion(&route, &remaining) {
                let order = remaining.remove(ins.remaining_idx);
                route.orders.insert(ins.position, order);
                route.vehicle = ins.vehicle;
                route.cost = ins.cost;
            }

            trace!(
                "closing route with {} orders, vehicle type {}, cost {}",
                route.len(),
                route.vehicle,
                route.cost
            );
            solution.push_route(route);
        }

        solution
    }
}
