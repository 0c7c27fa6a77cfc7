//! What a merge hands back to the persistence layer.

use lm_types::{Baseline, BlockId, Line, LineId, LineTranscription, PartId, TypologyId};
use serde::{Deserialize, Serialize};

/// Everything needed to create the line that replaces a candidate set.
///
/// The descriptor carries no line id: the persistence layer assigns one
/// when it inserts the line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedLineDescriptor {
    pub part: PartId,
    pub block: Option<BlockId>,
    pub typology: Option<TypologyId>,
    pub script: Option<String>,
    pub baseline: Baseline,
    /// One entry per layer with content, in document layer order.
    pub transcriptions: Vec<LineTranscription>,
}

impl MergedLineDescriptor {
    /// Text of the merged line under `layer`, if any line contributed.
    pub fn content(&self, layer: lm_types::LayerId) -> Option<&str> {
        self.transcriptions
            .iter()
            .find(|t| t.layer == layer)
            .map(|t| t.content.as_str())
    }
}

/// The result of a successful merge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub descriptor: MergedLineDescriptor,
    /// Source line ids in inferred reading order.
    pub order: Vec<LineId>,
    /// Source line ids in the caller's order. The caller removes these
    /// once the merged line is stored.
    pub consumed: Vec<LineId>,
}

/// Splice baselines end to end, keeping every point.
pub fn concat_baselines<'a, I>(ordered: I) -> Baseline
where
    I: IntoIterator<Item = &'a Line>,
{
    let mut merged = Baseline::default();
    for line in ordered {
        merged.extend_from(&line.baseline);
    }
    merged
}
