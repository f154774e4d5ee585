use enum_map::Enum;

use crate::problem::Num;
use crate::solution::Route;

#[derive(Copy, Clone, Debug, Enum)]
pub enum MoveType {
    IntraTwoOpt,
    InterRelocate,
}

/// Reversal of `orders[from..to]` within a single route.
#[derive(Clone, Debug)]
pub struct TwoOptMove {
    pub from: usize,
    pub to: usize,
    pub route: Route,
}

/// Move of the order at `source_position` of route `source` to `target_position` of route
/// `target`. Both resulting routes are evaluated before the move is applied.
#[derive(Clone, Debug)]
pub struct InterRelocateMove {
    pub source: usize,
    pub target: usize,
    pub source_position: usize,
    pub target_position: usize,
    pub new_source: Route,
    pub new_target: Route,
}

impl InterRelocateMove {
    pub fn new_cost(&self) -> Num {
        self.new_source.cost + self.new_target.cost
    }
}
