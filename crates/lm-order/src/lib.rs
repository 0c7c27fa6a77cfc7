//! Reading-order engine for line merging.
//!
//! Given a small set of line fragments, infers the order a reader would
//! visit them in, using baseline geometry only. The path problem is posed
//! as an assignment problem over an `(n + 2)`-square matrix with start and
//! end sentinels and solved with the Hungarian algorithm. Private cycles
//! the relaxation prefers are split by branch and bound, and the resulting
//! matching is read back as a chain from the start sentinel to the end
//! sentinel.
//!
//! # Key Types
//!
//! - [`distance`] -- Directed end-to-start cost between two baselines
//! - [`SentinelCosts`] / [`CostMatrix`] / [`build_cost_matrix`] -- Matrix construction
//! - [`AssignmentSolver`] / [`HungarianSolver`] / [`Assignment`] -- Minimum-cost matching
//! - [`solve_chain`] -- Branch-and-bound repair of sub-cycles in the matching
//! - [`extract_order`] -- Chain extraction from a single-chain matching
//! - [`ReadingOrder`] -- The full pipeline

pub mod chain;
pub mod distance;
pub mod error;
pub mod extract;
pub mod matrix;
pub mod order;
pub mod solver;

pub use chain::{solve_chain, MAX_SEARCH_NODES};
pub use distance::distance;
pub use error::{OrderError, OrderResult, SolverError};
pub use extract::{extract_order, sub_cycles};
pub use matrix::{
    build_cost_matrix, end_sentinel, forbidden_cost, start_sentinel, CostMatrix, SentinelCosts,
    DEFAULT_BOUNDARY_COST, DEFAULT_FORBIDDEN_COST,
};
pub use order::{find_order, OrderSolution, ReadingOrder};
pub use solver::{Assignment, AssignmentSolver, HungarianSolver};
