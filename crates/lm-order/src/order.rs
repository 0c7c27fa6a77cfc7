//! The reading-order pipeline: matrix → assignment → chain.

use lm_types::Baseline;
use tracing::debug;

use crate::chain::solve_chain;
use crate::error::OrderResult;
use crate::extract::extract_order;
use crate::matrix::{build_cost_matrix, CostMatrix, SentinelCosts};
use crate::solver::{AssignmentSolver, HungarianSolver};

/// The result of ordering a candidate set.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderSolution {
    /// Indices into the caller's list, in reading order.
    pub order: Vec<usize>,
    /// Sum of the real-to-real transition distances along the chain.
    pub path_cost: f64,
}

/// Infers the reading order of a small set of lines from their baselines.
///
/// Holds no per-request state; one instance can serve concurrent callers.
#[derive(Clone, Debug)]
pub struct ReadingOrder<S = HungarianSolver> {
    solver: S,
    costs: SentinelCosts,
}

impl ReadingOrder<HungarianSolver> {
    /// Use the built-in Hungarian solver with the given sentinel costs.
    pub fn new(costs: SentinelCosts) -> Self {
        Self {
            solver: HungarianSolver,
            costs,
        }
    }
}

impl Default for ReadingOrder<HungarianSolver> {
    fn default() -> Self {
        Self::new(SentinelCosts::default())
    }
}

impl<S: AssignmentSolver> ReadingOrder<S> {
    /// Use a custom assignment solver.
    pub fn with_solver(solver: S, costs: SentinelCosts) -> Self {
        Self { solver, costs }
    }

    /// The sentinel-augmented matrix this engine would solve.
    pub fn cost_matrix<B: AsRef<Baseline>>(&self, baselines: &[B]) -> OrderResult<CostMatrix> {
        build_cost_matrix(baselines, &self.costs)
    }

    /// Order `baselines`, returning indices into the input slice.
    pub fn order<B: AsRef<Baseline>>(&self, baselines: &[B]) -> OrderResult<Vec<usize>> {
        self.solve(baselines).map(|s| s.order)
    }

    /// Order `baselines` and report the cost of the resulting chain.
    pub fn solve<B: AsRef<Baseline>>(&self, baselines: &[B]) -> OrderResult<OrderSolution> {
        let matrix = self.cost_matrix(baselines)?;
        let assignment = solve_chain(&self.solver, &matrix, baselines.len())?;
        let order = extract_order(&assignment, baselines.len())?;

        let path_cost: f64 = order
            .windows(2)
            .map(|pair| matrix.get(pair[0], pair[1]))
            .sum();

        debug!(
            lines = baselines.len(),
            assignment_cost = assignment.cost(),
            path_cost,
            "inferred reading order"
        );
        Ok(OrderSolution { order, path_cost })
    }
}

/// Order `baselines` with the default solver and sentinel costs.
pub fn find_order<B: AsRef<Baseline>>(baselines: &[B]) -> OrderResult<Vec<usize>> {
    ReadingOrder::new(SentinelCosts::default()).order(baselines)
}
