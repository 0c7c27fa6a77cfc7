//! The merge pipeline: validate → order → merge attributes.

use std::collections::HashSet;

use lm_order::{AssignmentSolver, HungarianSolver, ReadingOrder};
use lm_types::{DocumentContext, Line, LineId};
use tracing::debug;

use crate::config::MergeConfig;
use crate::descriptor::{concat_baselines, MergeOutcome, MergedLineDescriptor};
use crate::error::{MergeError, MergeResult};
use crate::source::LineSource;
use crate::transcription::fuse_transcriptions;
use crate::typology::resolve_typology;

/// Merges a caller-chosen set of lines into the description of one line.
///
/// The merger is stateless between calls and can be shared across threads.
/// It never persists anything: the caller stores the descriptor and removes
/// the consumed lines.
#[derive(Clone, Debug)]
pub struct LineMerger<S = HungarianSolver> {
    config: MergeConfig,
    reading_order: ReadingOrder<S>,
}

impl LineMerger<HungarianSolver> {
    pub fn new(config: MergeConfig) -> Self {
        let reading_order = ReadingOrder::new(config.costs);
        Self {
            config,
            reading_order,
        }
    }
}

impl Default for LineMerger<HungarianSolver> {
    fn default() -> Self {
        Self::new(MergeConfig::default())
    }
}

impl<S: AssignmentSolver> LineMerger<S> {
    /// Use a custom assignment solver.
    pub fn with_solver(config: MergeConfig, solver: S) -> Self {
        let reading_order = ReadingOrder::with_solver(solver, config.costs);
        Self {
            config,
            reading_order,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn reading_order(&self) -> &ReadingOrder<S> {
        &self.reading_order
    }

    /// Check that `lines` can be merged at all.
    ///
    /// Runs before any matrix is built so a bad request fails fast with a
    /// reason naming the offending line.
    pub fn validate(&self, lines: &[Line]) -> MergeResult<()> {
        if lines.len() < 2 {
            return Err(MergeError::invalid(format!(
                "at least 2 lines are required, got {}",
                lines.len()
            )));
        }

        let mut seen = HashSet::with_capacity(lines.len());
        for line in lines {
            if !seen.insert(line.id) {
                return Err(MergeError::invalid(format!("{} appears more than once", line.id)));
            }
            if !line.baseline.is_usable() {
                return Err(MergeError::invalid(format!(
                    "{} has no usable baseline",
                    line.id
                )));
            }
        }

        if self.config.require_same_part {
            let part = lines[0].part;
            if let Some(other) = lines.iter().find(|l| l.part != part) {
                return Err(MergeError::invalid(format!(
                    "{} belongs to {}, expected {}",
                    other.id, other.part, part
                )));
            }
        }
        Ok(())
    }

    /// Reading order of `lines` as indices into the slice.
    pub fn order(&self, lines: &[Line]) -> MergeResult<Vec<usize>> {
        self.validate(lines)?;
        Ok(self.reading_order.order(lines)?)
    }

    /// Merge `lines` (in the caller's order) into one line description.
    ///
    /// Representative fields (part, block, script) and the typology
    /// tie-break come from `lines[0]`, regardless of reading order.
    pub fn merge(&self, lines: &[Line], context: &DocumentContext) -> MergeResult<MergeOutcome> {
        let order = self.order(lines)?;
        let ordered: Vec<&Line> = order.iter().map(|&i| &lines[i]).collect();
        let representative = &lines[0];

        let descriptor = MergedLineDescriptor {
            part: representative.part,
            block: representative.block,
            typology: resolve_typology(ordered.iter().copied(), representative),
            script: representative.script.clone(),
            baseline: concat_baselines(ordered.iter().copied()),
            transcriptions: fuse_transcriptions(ordered.iter().copied(), context),
        };

        let outcome = MergeOutcome {
            descriptor,
            order: ordered.iter().map(|l| l.id).collect(),
            consumed: lines.iter().map(|l| l.id).collect(),
        };
        debug!(
            lines = lines.len(),
            points = outcome.descriptor.baseline.len(),
            layers = outcome.descriptor.transcriptions.len(),
            "merged candidate set"
        );
        Ok(outcome)
    }

    /// Resolve `ids` through `source`, then merge them.
    pub fn merge_ids(&self, source: &dyn LineSource, ids: &[LineId]) -> MergeResult<MergeOutcome> {
        let lines = source.lines(ids)?;
        let context = source.context()?;
        self.merge(&lines, &context)
    }
}

/// Merge `lines` with the default configuration.
pub fn merge_lines(lines: &[Line], context: &DocumentContext) -> MergeResult<MergeOutcome> {
    LineMerger::new(MergeConfig::default()).merge(lines, context)
}
