use took::Took;

use crate::solution::Solution;

pub fn format_log_method_solution_timed(method: &str, sol: &Solution, took: &Took) -> String {
    format!("{method} - {}, took: {took}", format_log_solution(sol))
}

/// `unassigned/routes/cost`
pub fn format_log_solution(sol: &Solution) -> String {
    format!(
        "{}/{}/{:.3}",
        sol.number_of_unassigned_orders(),
        sol.number_of_routes(),
        sol.total_cost(),
    )
}
