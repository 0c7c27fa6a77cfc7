//! Cost matrix construction.
//!
//! The reading-order problem is a path through all candidate lines. To solve
//! it as an assignment problem the matrix gets two extra nodes: a start
//! sentinel at index `n` and an end sentinel at index `n + 1`. Row `i`
//! matched to column `j` reads as "line `i` is followed by line `j`".
//!
//! | from \ to      | real `j`            | start `n`  | end `n + 1` |
//! |----------------|---------------------|------------|-------------|
//! | real `i`       | distance (forbidden if `i == j`) | forbidden | boundary |
//! | start `n`      | boundary            | forbidden  | forbidden   |
//! | end `n + 1`    | forbidden           | forbidden  | forbidden   |

use lm_types::Baseline;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::distance;
use crate::error::{OrderError, OrderResult, SolverError};

/// Cost of entering the first line from the start sentinel, and of leaving
/// the last line for the end sentinel.
pub const DEFAULT_BOUNDARY_COST: f64 = 1.0;

/// Finite stand-in for an impossible transition. Well above pixel-scale
/// distances while keeping `f64` precision for them. [`build_cost_matrix`]
/// raises it when the distances of a candidate set come close.
pub const DEFAULT_FORBIDDEN_COST: f64 = 1.0e9;

/// The two constant costs used for sentinel edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelCosts {
    /// Cost of any start → line and line → end edge.
    pub boundary: f64,
    /// Cost of an edge the ordering must never use.
    pub forbidden: f64,
}

impl Default for SentinelCosts {
    fn default() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY_COST,
            forbidden: DEFAULT_FORBIDDEN_COST,
        }
    }
}

impl SentinelCosts {
    pub fn new(boundary: f64, forbidden: f64) -> Self {
        Self {
            boundary,
            forbidden,
        }
    }

    /// Both costs must be finite, `boundary` non-negative, and `forbidden`
    /// strictly greater than `boundary`.
    pub fn validate(&self) -> Result<(), SolverError> {
        let ok = self.boundary.is_finite()
            && self.forbidden.is_finite()
            && self.boundary >= 0.0
            && self.forbidden > self.boundary;
        if ok {
            Ok(())
        } else {
            Err(SolverError::InvalidSentinelCosts {
                boundary: self.boundary,
                forbidden: self.forbidden,
            })
        }
    }

    /// These costs with `forbidden` raised above `chain_bound`, the most any
    /// legal chain can cost. Unchanged if `forbidden` already exceeds it.
    pub fn dominating(&self, chain_bound: f64) -> Self {
        if self.forbidden > chain_bound {
            *self
        } else {
            Self {
                forbidden: 2.0 * chain_bound + 1.0,
                ..*self
            }
        }
    }
}

/// Index of the start sentinel for `line_count` real lines.
pub const fn start_sentinel(line_count: usize) -> usize {
    line_count
}

/// Index of the end sentinel for `line_count` real lines.
pub const fn end_sentinel(line_count: usize) -> usize {
    line_count + 1
}

/// A dense, square, row-major cost matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// A `size × size` matrix with every cell set to `fill`.
    pub fn filled(size: usize, fill: f64) -> Self {
        Self {
            size,
            costs: vec![fill; size * size],
        }
    }

    /// Build from nested rows, checking that the shape is square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SolverError> {
        let size = rows.len();
        let mut costs = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(SolverError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            costs.extend(values);
        }
        Ok(Self { size, costs })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.costs[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cost: f64) {
        self.costs[row * self.size + col] = cost;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.costs[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.costs.chunks(self.size.max(1)).take(self.size)
    }

    /// First non-finite cell, in row-major order.
    pub fn check_finite(&self) -> Result<(), SolverError> {
        match self.costs.iter().position(|c| !c.is_finite()) {
            Some(pos) => Err(SolverError::NonFinite {
                row: pos / self.size,
                col: pos % self.size,
                value: self.costs[pos],
            }),
            None => Ok(()),
        }
    }

    /// Sum of the cells selected by `assignment` (row → column).
    pub fn total_cost(&self, assignment: &[usize]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .map(|(row, &col)| self.get(row, col))
            .sum()
    }
}

/// Build the `(n + 2) × (n + 2)` ordering matrix for `baselines`.
///
/// Fails if fewer than two baselines are given, if any baseline is not
/// usable, or if `costs` is invalid. The forbidden cost written to the
/// matrix is `costs.forbidden`, raised if needed so that it exceeds every
/// legal chain (see [`forbidden_cost`]).
pub fn build_cost_matrix<B: AsRef<Baseline>>(
    baselines: &[B],
    costs: &SentinelCosts,
) -> OrderResult<CostMatrix> {
    let n = baselines.len();
    if n < 2 {
        return Err(OrderError::TooFewLines(n));
    }
    costs.validate()?;
    if let Some(index) = baselines.iter().position(|b| !b.as_ref().is_usable()) {
        return Err(OrderError::UnusableBaseline { index });
    }

    let mut distances = vec![0.0; n * n];
    let mut chain_bound = 2.0 * costs.boundary;
    for (i, from) in baselines.iter().enumerate() {
        for (j, to) in baselines.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = distance(from.as_ref(), to.as_ref())
                .ok_or(OrderError::UnusableBaseline { index: i })?;
            distances[i * n + j] = d;
            chain_bound += d;
        }
    }

    let effective = costs.dominating(chain_bound);
    if effective.forbidden != costs.forbidden {
        debug!(
            configured = costs.forbidden,
            effective = effective.forbidden,
            "raised forbidden cost above chain bound"
        );
    }

    let start = start_sentinel(n);
    let end = end_sentinel(n);
    let mut matrix = CostMatrix::filled(n + 2, effective.forbidden);
    for i in 0..n {
        for j in (0..n).filter(|&j| j != i) {
            matrix.set(i, j, distances[i * n + j]);
        }
        matrix.set(i, end, effective.boundary);
        matrix.set(start, i, effective.boundary);
    }

    debug!(lines = n, size = matrix.size(), "built ordering cost matrix");
    Ok(matrix)
}

/// Forbidden cost of an ordering matrix built for `line_count` lines.
///
/// The end → start cell is forbidden in every ordering matrix, so it holds
/// the effective value chosen by [`build_cost_matrix`].
pub fn forbidden_cost(matrix: &CostMatrix, line_count: usize) -> f64 {
    matrix.get(end_sentinel(line_count), start_sentinel(line_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_lines() -> Vec<Baseline> {
        vec![
            Baseline::from_coords(&[(0.0, 0.0), (10.0, 0.0)]),
            Baseline::from_coords(&[(20.0, 0.0), (30.0, 0.0)]),
            Baseline::from_coords(&[(10.0, 0.0), (20.0, 0.0)]),
        ]
    }

    #[test]
    fn layout_matches_sentinel_table() {
        let costs = SentinelCosts::default();
        let m = build_cost_matrix(&three_lines(), &costs).unwrap();
        let f = costs.forbidden;
        let b = costs.boundary;

        assert_eq!(m.size(), 5);
        assert_eq!(m.row(0), &[f, 10.0, 0.0, f, b]);
        assert_eq!(m.row(1), &[30.0, f, 20.0, f, b]);
        assert_eq!(m.row(2), &[20.0, 0.0, f, f, b]);
        assert_eq!(m.row(3), &[b, b, b, f, f]);
        assert_eq!(m.row(4), &[f, f, f, f, f]);
    }

    #[test]
    fn custom_costs_are_used() {
        let costs = SentinelCosts::new(2.5, 1.0e6);
        let m = build_cost_matrix(&three_lines(), &costs).unwrap();
        assert_eq!(m.get(0, end_sentinel(3)), 2.5);
        assert_eq!(m.get(start_sentinel(3), 1), 2.5);
        assert_eq!(m.get(1, 1), 1.0e6);
    }

    #[test]
    fn distant_lines_raise_forbidden_cost() {
        let lines = vec![
            Baseline::from_coords(&[(0.0, 0.0), (10.0, 0.0)]),
            Baseline::from_coords(&[(3.0e9, 0.0), (3.0e9 + 10.0, 0.0)]),
        ];
        let m = build_cost_matrix(&lines, &SentinelCosts::default()).unwrap();
        let f = forbidden_cost(&m, 2);
        let chain = m.get(start_sentinel(2), 0) + m.get(0, 1) + m.get(1, end_sentinel(2));

        assert!(f > DEFAULT_FORBIDDEN_COST);
        assert!(f > chain);
        assert_eq!(m.get(0, 0), f);
        assert_eq!(m.get(0, 1), 3.0e9 - 10.0);
    }

    #[test]
    fn dominating_keeps_sufficient_costs() {
        let costs = SentinelCosts::default();
        assert_eq!(costs.dominating(500.0), costs);
        let raised = costs.dominating(2.0e9);
        assert_eq!(raised.boundary, costs.boundary);
        assert!(raised.forbidden > 2.0e9);
    }

    #[test]
    fn too_few_lines() {
        let one = vec![Baseline::from_coords(&[(0.0, 0.0), (1.0, 0.0)])];
        assert_eq!(
            build_cost_matrix(&one, &SentinelCosts::default()),
            Err(OrderError::TooFewLines(1))
        );
        let none: Vec<Baseline> = Vec::new();
        assert_eq!(
            build_cost_matrix(&none, &SentinelCosts::default()),
            Err(OrderError::TooFewLines(0))
        );
    }

    #[test]
    fn unusable_baseline_reports_position() {
        let mut lines = three_lines();
        lines[1] = Baseline::from_coords(&[(5.0, 5.0)]);
        assert_eq!(
            build_cost_matrix(&lines, &SentinelCosts::default()),
            Err(OrderError::UnusableBaseline { index: 1 })
        );
    }

    #[test]
    fn invalid_costs_rejected() {
        let err = build_cost_matrix(&three_lines(), &SentinelCosts::new(5.0, 5.0)).unwrap_err();
        assert!(matches!(
            err,
            OrderError::Solver(SolverError::InvalidSentinelCosts { .. })
        ));
        assert!(SentinelCosts::new(1.0, f64::INFINITY).validate().is_err());
        assert!(SentinelCosts::new(-1.0, 10.0).validate().is_err());
        assert!(SentinelCosts::default().validate().is_ok());
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            SolverError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn check_finite_locates_cell() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![f64::NAN, 4.0]]).unwrap();
        assert!(matches!(
            m.check_finite(),
            Err(SolverError::NonFinite { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn rows_iterates_in_order() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let rows: Vec<&[f64]> = m.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
        assert_eq!(m.total_cost(&[1, 0]), 5.0);
    }

    #[test]
    fn sentinel_costs_deserialize_with_defaults() {
        let parsed: SentinelCosts = serde_json::from_str(r#"{"boundary": 3.0}"#).unwrap();
        assert_eq!(parsed.boundary, 3.0);
        assert_eq!(parsed.forbidden, DEFAULT_FORBIDDEN_COST);
    }
}
