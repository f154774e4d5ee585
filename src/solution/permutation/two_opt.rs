use log::trace;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::evaluation::{best_vehicle, BestVehicle};
use crate::problem::instance::Instance;
use crate::problem::Num;
use crate::solution::permutation::moves::TwoOptMove;
use crate::solution::{Route, Solution};
use crate::utils::Tolerance;

/// First reversal of `route.orders[i..j]` (with `j >= i + 2`) that lowers the route cost.
pub(crate) fn find_first_improving_reversal(
    instance: &Instance,
    route: &Route,
) -> Option<TwoOptMove> {
    let n = route.len();
    let mut candidate = Vec::with_capacity(n);
    for i in 0..n {
        for j in (i + 2)..=n {
            candidate.clear();
            candidate.extend_from_slice(&route.orders);
            candidate[i..j].reverse();
            if let BestVehicle::Some(vehicle, cost) = best_vehicle(instance, &candidate) {
                if cost < route.cost - Num::tol() {
                    return Some(TwoOptMove {
                        from: i,
                        to: j,
                        route: Route {
                            orders: candidate,
                            vehicle,
                            cost,
                        },
                    });
                }
            }
        }
    }
    None
}

/// First-improvement 2-opt on a single route; returns the number of accepted reversals.
pub fn two_opt_route(instance: &Instance, route: &mut Route) -> usize {
    let mut accepted = 0;
    while let Some(mv) = find_first_improving_reversal(instance, route) {
        trace!(
            "2-opt: reverse [{}, {}) -> cost {} (was {})",
            mv.from,
            mv.to,
            mv.route.cost,
            route.cost
        );
        *route = mv.route;
        accepted += 1;
    }
    let admissible = route.refresh_vehicle(instance);
    debug_assert!(admissible);
    accepted
}

impl Solution<'_> {
    /// Applies 2-opt to every route independently.
    pub fn two_opt(&mut self) -> usize {
        let instance = self.instance;
        #[cfg(feature = "parallel")]
        let accepted = self
            .routes
            .par_iter_mut()
            .map(|route| two_opt_route(instance, route))
            .sum::<usize>();
        #[cfg(not(feature = "parallel"))]
        let accepted = self
            .routes
            .iter_mut()
            .map(|route| two_opt_route(instance, route))
            .sum::<usize>();
        accepted
    }
}
