//! Directed adjacency cost between two baselines.

use lm_types::Baseline;

/// Distance from the end of `a` to the start of `b`.
///
/// This is the cost of reading `b` immediately after `a`, so it is
/// asymmetric: `distance(a, b)` and `distance(b, a)` generally differ.
/// Returns `None` when either baseline has no points.
pub fn distance(a: &Baseline, b: &Baseline) -> Option<f64> {
    let end = a.last()?;
    let start = b.first()?;
    Some(end.distance_to(start))
}
