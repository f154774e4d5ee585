use itertools::Itertools;
use log::trace;

use crate::solution::permutation::moves::InterRelocateMove;
use crate::solution::{Route, Solution};
use crate::problem::Num;
use crate::utils::Tolerance;

/// Insertion positions tried in the target route: start, middle and end.
fn candidate_positions(len: usize) -> impl Iterator<Item = usize> {
    [0, len / 2, len].into_iter().dedup()
}

impl Solution<'_> {
    /// First move of a single order into another route that lowers the cost of both routes
    /// together. Sources with a single order are skipped so routes never vanish.
    pub(crate) fn find_first_improving_relocation(&self) -> Option<InterRelocateMove> {
        let num_routes = self.routes.len();
        let mut source_orders = Vec::new();
        let mut target_orders = Vec::new();

        for source in 0..num_routes {
            let source_route = &self.routes[source];
            if source_route.len() <= 1 {
                continue;
            }
            for target in (0..num_routes).filter(|&it| it != source) {
                let target_route = &self.routes[target];
                let old_cost = source_route.cost + target_route.cost;

                for source_position in 0..source_route.len() {
                    let order = source_route.orders[source_position];
                    source_orders.clear();
                    source_orders.extend(
                        source_route
                            .orders
                            .iter()
                            .enumerate()
                            .filter(|(idx, _)| *idx != source_position)
                            .map(|(_, &id)| id),
                    );
                    let new_source = match Route::with_orders(self.instance, source_orders.clone()) {
                        Some(route) => route,
                        None => continue,
                    };
                    if new_source.cost >= old_cost - Num::tol() {
                        // even a free target could not pay off
                        continue;
                    }

                    for target_position in candidate_positions(target_route.len()) {
                        target_orders.clear();
                        target_orders.extend_from_slice(&target_route.orders[..target_position]);
                        target_orders.push(order);
                        target_orders.extend_from_slice(&target_route.orders[target_position..]);

                        if let Some(new_target) =
                            Route::with_orders(self.instance, target_orders.clone())
                        {
                            if new_source.cost + new_target.cost < old_cost - Num::tol() {
                                return Some(InterRelocateMove {
                                    source,
                                    target,
                                    source_position,
                                    target_position,
                                    new_source,
                                    new_target,
                                });
                            }
                        }
                    }
                }
            }
        }
        None
    }

    pub(crate) fn apply_inter_relocate_move(&mut self, mv: InterRelocateMove) {
        debug_assert_ne!(mv.source, mv.target);
        #[cfg(feature = "search_assertions")]
        let num_assigned = self.number_of_assigned_orders();

        self.routes[mv.source] = mv.new_source;
        self.routes[mv.target] = mv.new_target;

        #[cfg(feature = "search_assertions")]
        assert_eq!(num_assigned, self.number_of_assigned_orders());
    }

    /// Relocates single orders between routes until no improving relocation is left; returns the
    /// number of accepted moves.
    pub fn relocate_light(&mut self) -> usize {
        let mut accepted = 0;
        while let Some(mv) = self.find_first_improving_relocation() {
            trace!(
                "relocate: order {} from route {}[{}] to route {}[{}] -> {} (was {})",
                self.routes[mv.source].orders[mv.source_position],
                mv.source,
                mv.source_position,
                mv.target,
                mv.target_position,
                mv.new_cost(),
                self.routes[mv.source].cost + self.routes[mv.target].cost,
            );
            self.apply_inter_relocate_move(mv);
            accepted += 1;
        }
        accepted
    }
}
