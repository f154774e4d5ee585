use enum_map::EnumMap;
use log::debug;
use took::Timer;

use crate::problem::Num;
use crate::solution::permutation::moves::MoveType;
use crate::solution::Solution;

pub mod moves;
pub mod relocate;
pub mod two_opt;

#[derive(Clone, Debug, Default)]
pub struct LocalSearchStats {
    pub accepted: EnumMap<MoveType, usize>,
    pub cost_before: Num,
    pub cost_after: Num,
}

impl LocalSearchStats {
    pub fn total_accepted(&self) -> usize {
        self.accepted.values().sum()
    }
}

/// Descent-only local search: 2-opt on every route, then relocate-light between routes.
pub struct LocalSearch {
    pub two_opt: bool,
    pub relocate: bool,
}

impl LocalSearch {
    pub fn new(two_opt: bool, relocate: bool) -> Self {
        Self { two_opt, relocate }
    }

    pub fn improve(&self, sol: &mut Solution) -> LocalSearchStats {
        let mut stats = LocalSearchStats {
            cost_before: sol.total_cost(),
            ..Default::default()
        };

        if self.two_opt {
            let timer = Timer::new();
            stats.accepted[MoveType::IntraTwoOpt] = sol.two_opt();
            debug!(
                "2-opt: {} reversals accepted, cost {:.3}, took: {}",
                stats.accepted[MoveType::IntraTwoOpt],
                sol.total_cost(),
                timer.took()
            );
        }
        if self.relocate {
            let timer = Timer::new();
            stats.accepted[MoveType::InterRelocate] = sol.relocate_light();
            debug!(
                "relocate-light: {} relocations accepted, cost {:.3}, took: {}",
                stats.accepted[MoveType::InterRelocate],
                sol.total_cost(),
                timer.took()
            );
        }

        stats.cost_after = sol.total_cost();
        stats
    }
}

#[cfg(test)]
mod tests {
    use crate::problem::fleet::tests::constant_vehicle;
    use crate::problem::instance::tests::{order_at, planar_instance};
    use crate::solution::Route;

    use super::*;

    #[test]
    fn combined_search_does_not_increase_cost() {
        let orders = (0..10)
            .map(|i| {
                let angle = i as Num * 2.2;
                order_at(
                    (300.0 + 40.0 * i as Num) * angle.cos(),
                    (300.0 + 40.0 * i as Num) * angle.sin(),
                    1.0,
                    0.0,
                    1e7,
                )
            })
            .collect();
        let mut vehicle = constant_vehicle(1, 5.0, 10.0);
        vehicle.radius_cost = 0.0005;
        let instance = planar_instance(orders, vec![vehicle]);
        let mut solution = Solution::new(&instance);
        solution.push_route(Route::with_orders(&instance, vec![0, 2, 4, 6, 8]).unwrap());
        solution.push_route(Route::with_orders(&instance, vec![1, 3, 5, 7, 9]).unwrap());

        let stats = LocalSearch::new(true, true).improve(&mut solution);

        assert!(stats.cost_after <= stats.cost_before);
        assert_eq!(stats.cost_after, solution.total_cost());
        assert_eq!(solution.number_of_assigned_orders(), 10);
        assert_eq!(
            stats.total_accepted(),
            stats.accepted[MoveType::IntraTwoOpt] + stats.accepted[MoveType::InterRelocate]
        );
    }

    #[test]
    fn disabled_search_changes_nothing() {
        let instance = planar_instance(
            vec![
                order_at(100.0, 0.0, 1.0, 0.0, 1e6),
                order_at(0.0, 100.0, 1.0, 0.0, 1e6),
            ],
            vec![constant_vehicle(1, 5.0, 10.0)],
        );
        let mut solution = Solution::new(&instance);
        solution.push_route(Route::with_orders(&instance, vec![0, 1]).unwrap());
        let stats = LocalSearch::new(false, false).improve(&mut solution);
        assert_eq!(stats.total_accepted(), 0);
        assert_eq!(stats.cost_before, stats.cost_after);
    }
}
