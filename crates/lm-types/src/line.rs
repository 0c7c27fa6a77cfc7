use serde::{Deserialize, Serialize};

use crate::geometry::Baseline;
use crate::ids::{BlockId, LayerId, LineId, PartId, TypologyId};

/// Text content of one line under one transcription layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTranscription {
    pub layer: LayerId,
    pub content: String,
}

impl LineTranscription {
    pub fn new(layer: LayerId, content: impl Into<String>) -> Self {
        Self {
            layer,
            content: content.into(),
        }
    }
}

/// A segmented line of a document part.
///
/// Lines are read-only to the merge engine. The persistence layer owns
/// them; a merge only produces a description of the line that replaces a
/// candidate set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub part: PartId,
    #[serde(default)]
    pub block: Option<BlockId>,
    #[serde(default)]
    pub typology: Option<TypologyId>,
    /// Script tag assigned by the recognizer (e.g. `"Latn"`).
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub baseline: Baseline,
    #[serde(default)]
    pub transcriptions: Vec<LineTranscription>,
}

impl Line {
    /// Create a line with no region, typology, script, or transcriptions.
    pub fn new(id: LineId, part: PartId, baseline: Baseline) -> Self {
        Self {
            id,
            part,
            block: None,
            typology: None,
            script: None,
            baseline,
            transcriptions: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: BlockId) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_typology(mut self, typology: TypologyId) -> Self {
        self.typology = Some(typology);
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Set (or replace) the content under `layer`.
    pub fn with_transcription(mut self, layer: LayerId, content: impl Into<String>) -> Self {
        let content = content.into();
        match self.transcriptions.iter_mut().find(|t| t.layer == layer) {
            Some(existing) => existing.content = content,
            None => self.transcriptions.push(LineTranscription::new(layer, content)),
        }
        self
    }

    /// Content of this line under `layer`, if any.
    pub fn content(&self, layer: LayerId) -> Option<&str> {
        self.transcriptions
            .iter()
            .find(|t| t.layer == layer)
            .map(|t| t.content.as_str())
    }
}

impl AsRef<Baseline> for Line {
    fn as_ref(&self) -> &Baseline {
        &self.baseline
    }
}
