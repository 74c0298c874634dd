use crate::instance::Instance;

/// Sum of the interaction costs between the types assigned to the two endpoints of every
/// edge. `assignment` must hold one valid type label per site.
///
/// Costs are accumulated as `i128`, which cannot overflow for any edge list that fits into
/// memory.
pub fn compute_objective(instance: &Instance, assignment: &[usize]) -> i128 {
    instance
        .edges()
        .iter()
        .map(|&(u, v)| i128::from(instance.cost(assignment[u], assignment[v])))
        .sum()
}
