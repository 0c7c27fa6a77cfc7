//! Minimum-cost perfect matching on a square cost matrix.
//!
//! [`HungarianSolver`] is the O(n³) shortest-augmenting-path form of the
//! Kuhn-Munkres algorithm: rows are inserted one at a time, and dual
//! potentials on rows and columns keep reduced costs non-negative so each
//! insertion is a Dijkstra-style search over columns.

use crate::error::SolverError;
use crate::matrix::CostMatrix;

/// A row → column bijection with its total cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    columns: Vec<usize>,
    cost: f64,
}

impl Assignment {
    /// Wrap a row → column mapping, checking that it is a permutation.
    pub fn new(columns: Vec<usize>, cost: f64) -> Result<Self, SolverError> {
        let n = columns.len();
        let mut seen = vec![false; n];
        for (row, &col) in columns.iter().enumerate() {
            if col >= n {
                return Err(SolverError::InvalidAssignment(format!(
                    "row {row} assigned to out-of-range column {col}"
                )));
            }
            if std::mem::replace(&mut seen[col], true) {
                return Err(SolverError::InvalidAssignment(format!(
                    "column {col} assigned more than once"
                )));
            }
        }
        Ok(Self { columns, cost })
    }

    /// Column matched to `row`.
    pub fn column(&self, row: usize) -> usize {
        self.columns[row]
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Solves the assignment problem.
///
/// Implementations must return a minimum-total-cost permutation and reject
/// matrices with non-finite cells.
pub trait AssignmentSolver: Send + Sync {
    fn solve(&self, matrix: &CostMatrix) -> Result<Assignment, SolverError>;
}

/// Hungarian algorithm with row/column potentials.
#[derive(Clone, Copy, Debug, Default)]
pub struct HungarianSolver;

impl HungarianSolver {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentSolver for HungarianSolver {
    fn solve(&self, matrix: &CostMatrix) -> Result<Assignment, SolverError> {
        matrix.check_finite()?;
        let n = matrix.size();
        if n == 0 {
            return Assignment::new(Vec::new(), 0.0);
        }

        // 1-based indexing; column 0 is a virtual column used as the root of
        // each augmenting search.
        let mut u = vec![0.0f64; n + 1];
        let mut v = vec![0.0f64; n + 1];
        // owner[j]: row currently matched to column j (0 = free).
        let mut owner = vec![0usize; n + 1];
        // way[j]: previous column on the shortest path to j.
        let mut way = vec![0usize; n + 1];

        for row in 1..=n {
            owner[0] = row;
            let mut j0 = 0usize;
            let mut min_reduced = vec![f64::INFINITY; n + 1];
            let mut used = vec![false; n + 1];

            loop {
                used[j0] = true;
                let i0 = owner[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0usize;

                for j in 1..=n {
                    if used[j] {
                        continue;
                    }
                    let reduced = matrix.get(i0 - 1, j - 1) - u[i0] - v[j];
                    if reduced < min_reduced[j] {
                        min_reduced[j] = reduced;
                        way[j] = j0;
                    }
                    if min_reduced[j] < delta {
                        delta = min_reduced[j];
                        j1 = j;
                    }
                }

                if j1 == 0 {
                    return Err(SolverError::InvalidAssignment(format!(
                        "no augmenting path for row {}",
                        row - 1
                    )));
                }

                for j in 0..=n {
                    if used[j] {
                        u[owner[j]] += delta;
                        v[j] -= delta;
                    } else {
                        min_reduced[j] -= delta;
                    }
                }

                j0 = j1;
                if owner[j0] == 0 {
                    break;
                }
            }

            // Flip the augmenting path back to the root.
            loop {
                let j1 = way[j0];
                owner[j0] = owner[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
        }

        let mut columns = vec![0usize; n];
        for j in 1..=n {
            columns[owner[j] - 1] = j - 1;
        }
        let cost = matrix.total_cost(&columns);
        Assignment::new(columns, cost)
    }
}
