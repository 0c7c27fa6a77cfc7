//! Sub-cycle repair for sentinel matchings.
//!
//! The assignment relaxation is free to close a few lines into a private
//! cycle when that is cheaper than linking them into the start → end chain.
//! [`solve_chain`] removes such cycles by branch and bound: a node of the
//! search fixes some edges in and some edges out, the assignment cost of the
//! constrained matrix is its lower bound, and a node whose matching still
//! contains a sub-cycle is split on the edges of its shortest cycle. Each
//! child excludes one edge of that cycle and keeps the edges before it, so
//! the children partition the remaining solutions.

use tracing::{debug, warn};

use crate::error::{OrderError, OrderResult, SolverError};
use crate::extract::{chain_prefix, sub_cycles};
use crate::matrix::{forbidden_cost, CostMatrix};
use crate::solver::{Assignment, AssignmentSolver};

/// Upper bound on solved nodes per search.
pub const MAX_SEARCH_NODES: usize = 10_000;

type Edge = (usize, usize);

#[derive(Clone, Debug, Default)]
struct Node {
    included: Vec<Edge>,
    excluded: Vec<Edge>,
}

impl Node {
    /// `matrix` with excluded edges, and every rival of an included edge,
    /// set to `forbidden`.
    fn constrain(&self, matrix: &CostMatrix, forbidden: f64) -> CostMatrix {
        let mut constrained = matrix.clone();
        let size = matrix.size();
        for &(row, col) in &self.excluded {
            constrained.set(row, col, forbidden);
        }
        for &(row, col) in &self.included {
            for j in (0..size).filter(|&j| j != col) {
                constrained.set(row, j, forbidden);
            }
            for i in (0..size).filter(|&i| i != row) {
                constrained.set(i, col, forbidden);
            }
        }
        constrained
    }

    fn children(&self, cycle: &[usize]) -> Vec<Node> {
        let edges: Vec<Edge> = cycle
            .iter()
            .zip(cycle.iter().cycle().skip(1))
            .map(|(&from, &to)| (from, to))
            .collect();

        let mut children = Vec::with_capacity(edges.len());
        for (i, &edge) in edges.iter().enumerate() {
            if self.included.contains(&edge) {
                continue;
            }
            let mut child = self.clone();
            child.excluded.push(edge);
            child.included.extend(
                edges[..i]
                    .iter()
                    .copied()
                    .filter(|e| !self.included.contains(e)),
            );
            children.push(child);
        }
        children
    }
}

/// Find a minimum-cost matching of an ordering matrix that forms a single
/// start → end chain over all `line_count` lines.
///
/// `matrix` must come from [`build_cost_matrix`](crate::build_cost_matrix).
/// Fails with [`OrderError::DegenerateMatching`] only when no chain is found
/// within [`MAX_SEARCH_NODES`] solved nodes; the error then describes the
/// unconstrained matching.
pub fn solve_chain<S>(
    solver: &S,
    matrix: &CostMatrix,
    line_count: usize,
) -> OrderResult<Assignment>
where
    S: AssignmentSolver + ?Sized,
{
    let forbidden = forbidden_cost(matrix, line_count);
    // A legal chain uses exactly one forbidden cell (end → start).
    let infeasible = 2.0 * forbidden;

    let mut root: Option<Assignment> = None;
    let mut best: Option<(f64, Assignment)> = None;
    let mut stack = vec![Node::default()];
    let mut solved = 0usize;

    while let Some(node) = stack.pop() {
        if solved == MAX_SEARCH_NODES {
            warn!(solved, pending = stack.len(), "chain search budget exhausted");
            break;
        }
        solved += 1;

        let constrained = node.constrain(matrix, forbidden);
        let assignment = solver.solve(&constrained)?;
        if assignment.len() != matrix.size() {
            return Err(SolverError::InvalidAssignment(format!(
                "expected {} rows, got {}",
                matrix.size(),
                assignment.len()
            ))
            .into());
        }
        let bound = constrained.total_cost(assignment.columns());
        if root.is_none() {
            root = Some(assignment.clone());
        }

        if bound >= infeasible || best.as_ref().is_some_and(|(cost, _)| bound >= *cost) {
            continue;
        }

        let cycles = sub_cycles(&assignment, line_count);
        match cycles.iter().min_by_key(|c| c.len()) {
            None => best = Some((bound, assignment)),
            Some(cycle) => {
                // Reversed so the first child is searched first.
                stack.extend(node.children(cycle).into_iter().rev());
            }
        }
    }

    match best {
        Some((cost, assignment)) => {
            debug!(solved, cost, "found single-chain matching");
            Ok(assignment)
        }
        None => {
            let visited = root.map_or(0, |a| chain_prefix(&a, line_count).len());
            warn!(visited, expected = line_count, "no single-chain matching found");
            Err(OrderError::DegenerateMatching {
                visited,
                expected: line_count,
            })
        }
    }
}
