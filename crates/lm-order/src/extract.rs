//! Turning a sentinel matching back into a linear order.

use tracing::warn;

use crate::error::{OrderError, OrderResult, SolverError};
use crate::matrix::{end_sentinel, start_sentinel};
use crate::solver::Assignment;

/// Follow the successor relation from the start sentinel to the end
/// sentinel and return the real-line indices in visiting order.
///
/// A minimum-cost matching is a permutation, so it may close some lines
/// into cycles that never touch the sentinels. Those lines would be missing
/// from the chain; this is reported as [`OrderError::DegenerateMatching`]
/// instead of returning a partial order.
pub fn extract_order(assignment: &Assignment, line_count: usize) -> OrderResult<Vec<usize>> {
    let start = start_sentinel(line_count);
    let end = end_sentinel(line_count);
    if assignment.len() != line_count + 2 {
        return Err(SolverError::InvalidAssignment(format!(
            "expected {} rows, got {}",
            line_count + 2,
            assignment.len()
        ))
        .into());
    }

    let order = chain_prefix(assignment, line_count);
    let last = order.last().copied().unwrap_or(start);
    if assignment.column(last) != end || order.len() != line_count {
        warn!(
            visited = order.len(),
            expected = line_count,
            "matching split the lines into disjoint cycles"
        );
        return Err(OrderError::DegenerateMatching {
            visited: order.len(),
            expected: line_count,
        });
    }

    Ok(order)
}

/// Real lines reached from the start sentinel before the walk hits the end
/// sentinel, returns to the start, or repeats a line.
pub(crate) fn chain_prefix(assignment: &Assignment, line_count: usize) -> Vec<usize> {
    let start = start_sentinel(line_count);
    let end = end_sentinel(line_count);
    let mut order = Vec::with_capacity(line_count);
    let mut seen = vec![false; line_count];
    let mut current = start;

    loop {
        let next = assignment.column(current);
        if next == end || next == start || seen[next] {
            break;
        }
        seen[next] = true;
        order.push(next);
        current = next;
    }
    order
}

/// Cycles of the matching that do not pass through the start sentinel.
///
/// Each cycle is listed in successor order beginning at its lowest index.
/// The assignment must cover `line_count + 2` rows.
pub fn sub_cycles(assignment: &Assignment, line_count: usize) -> Vec<Vec<usize>> {
    let size = assignment.len();
    let mut visited = vec![false; size];

    let mut current = start_sentinel(line_count);
    while !visited[current] {
        visited[current] = true;
        current = assignment.column(current);
    }

    let mut cycles = Vec::new();
    for first in 0..size {
        if visited[first] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut current = first;
        while !visited[current] {
            visited[current] = true;
            cycle.push(current);
            current = assignment.column(current);
        }
        cycles.push(cycle);
    }
    cycles
}
