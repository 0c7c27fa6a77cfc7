//! Majority vote over line typologies.

use lm_types::{Line, TypologyId};

/// Occurrence count of one typology value, in first-seen order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypologyTally {
    pub typology: Option<TypologyId>,
    pub count: usize,
}

/// Count each distinct typology over `lines`. A missing typology counts as
/// its own value. The result is sorted by descending count; values with
/// equal counts keep first-seen order.
pub fn tally_typologies<'a, I>(lines: I) -> Vec<TypologyTally>
where
    I: IntoIterator<Item = &'a Line>,
{
    let mut tally: Vec<TypologyTally> = Vec::new();
    for line in lines {
        match tally.iter_mut().find(|t| t.typology == line.typology) {
            Some(entry) => entry.count += 1,
            None => tally.push(TypologyTally {
                typology: line.typology,
                count: 1,
            }),
        }
    }
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}

/// Pick the typology of the merged line.
///
/// The most frequent value wins when it is the only value or strictly more
/// frequent than the runner-up. Otherwise the typology of `fallback` is used,
/// which is the first line in the caller's list, not the first line in
/// reading order.
pub fn resolve_typology<'a, I>(ordered: I, fallback: &Line) -> Option<TypologyId>
where
    I: IntoIterator<Item = &'a Line>,
{
    let tally = tally_typologies(ordered);
    match tally.as_slice() {
        [only] => only.typology,
        [top1, top2, ..] if top1.count > top2.count => top1.typology,
        _ => fallback.typology,
    }
}
