use serde::Serialize;

use crate::problem::Num;

#[derive(Clone, Debug, Serialize)]
pub struct RouteDescription {
    pub family: u32,
    /// original order ids in visiting order
    pub orders: Vec<u64>,
    pub cost: Num,
}

#[derive(Clone, Debug, Serialize)]
pub struct SolutionDescription {
    pub(crate) routes: Vec<RouteDescription>,
    pub(crate) unassigned_orders: Vec<u64>,
    pub(crate) total_cost: Num,
}

impl SolutionDescription {
    pub fn routes(&self) -> &[RouteDescription] {
        &self.routes
    }
    pub fn total_cost(&self) -> Num {
        self.total_cost
    }
    pub fn number_of_routes(&self) -> usize {
        self.routes.len()
    }
    pub fn number_of_unassigned_orders(&self) -> usize {
        self.unassigned_orders.len()
    }
    pub fn unassigned_orders(&self) -> &[u64] {
        &self.unassigned_orders
    }
    pub fn longest_route(&self) -> usize {
        self.routes.iter().map(|it| it.orders.len()).max().unwrap_or(0)
    }

    pub fn get_summary_string(&self) -> String {
        format!(
            "{}/{}/{:.3}",
            self.number_of_unassigned_orders(),
            self.number_of_routes(),
            self.total_cost()
        )
    }
}
