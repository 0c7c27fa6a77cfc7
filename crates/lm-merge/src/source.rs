//! The [`LineSource`] trait: read-only access to the lines of a part.
//!
//! The merge engine never loads lines itself. A persistence layer (database,
//! API client, or an in-memory [`DocumentSnapshot`]) implements this trait
//! so candidate ids can be resolved before a merge.

use lm_types::{DocumentContext, DocumentSnapshot, Line, LineId};

use crate::error::{MergeError, MergeResult};

/// Read-only lookup of lines and their document context.
pub trait LineSource: Send + Sync {
    /// Transcription layers and separator of the owning document.
    fn context(&self) -> MergeResult<DocumentContext>;

    /// Look up one line. Returns `Ok(None)` if the id is unknown.
    fn line(&self, id: LineId) -> MergeResult<Option<Line>>;

    /// Resolve `ids` in the given order, failing on the first unknown id.
    fn lines(&self, ids: &[LineId]) -> MergeResult<Vec<Line>> {
        ids.iter()
            .map(|&id| {
                self.line(id)?
                    .ok_or_else(|| MergeError::invalid(format!("unknown line {id}")))
            })
            .collect()
    }
}

impl LineSource for DocumentSnapshot {
    fn context(&self) -> MergeResult<DocumentContext> {
        Ok(self.context.clone())
    }

    fn line(&self, id: LineId) -> MergeResult<Option<Line>> {
        Ok(DocumentSnapshot::line(self, id).cloned())
    }
}
