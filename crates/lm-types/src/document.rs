//! Per-document transcription settings and part snapshots.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::{LayerId, LineId, PartId};
use crate::line::Line;

/// Separator used between fused line fragments when a document does not
/// configure one.
pub const DEFAULT_BLANK_SEPARATOR: char = ' ';

fn default_blank_separator() -> char {
    DEFAULT_BLANK_SEPARATOR
}

/// A named transcription channel shared across a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionLayer {
    pub id: LayerId,
    pub name: String,
}

impl TranscriptionLayer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The document-level inputs a merge reads besides the lines themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    /// Transcription layers in document order. Fused text is produced in
    /// this order.
    pub transcription_layers: Vec<TranscriptionLayer>,
    /// Character placed between consecutive fragments of fused text.
    #[serde(default = "default_blank_separator")]
    pub blank_separator: char,
}

impl DocumentContext {
    pub fn new(transcription_layers: Vec<TranscriptionLayer>, blank_separator: char) -> Self {
        Self {
            transcription_layers,
            blank_separator,
        }
    }

    /// A context with the given layers and the default separator.
    pub fn with_layers(transcription_layers: Vec<TranscriptionLayer>) -> Self {
        Self::new(transcription_layers, DEFAULT_BLANK_SEPARATOR)
    }

    pub fn layer(&self, id: LayerId) -> Option<&TranscriptionLayer> {
        self.transcription_layers.iter().find(|l| l.id == id)
    }
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self::with_layers(Vec::new())
    }
}

/// A read-only snapshot of one document part: its lines and the context of
/// the owning document.
///
/// This is the exchange format the CLI reads from disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub part: PartId,
    #[serde(flatten)]
    pub context: DocumentContext,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl DocumentSnapshot {
    pub fn new(part: PartId, context: DocumentContext, lines: Vec<Line>) -> Self {
        Self {
            part,
            context,
            lines,
        }
    }

    /// Parse a snapshot from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, TypeError> {
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TypeError> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }
}
