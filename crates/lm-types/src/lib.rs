//! Shared types for line merging.
//!
//! Geometry, identifiers, and the line and document records that the ordering
//! engine (`lm-order`), the merge engine (`lm-merge`), and the CLI exchange.
//!
//! # Key Types
//!
//! - [`Point`] / [`Baseline`] -- Polyline under a recognized text line
//! - [`Line`] -- A segmented line with region, typology, and transcriptions
//! - [`LineId`], [`PartId`], [`BlockId`], [`TypologyId`], [`LayerId`] -- Numeric identifiers
//! - [`TranscriptionLayer`] / [`DocumentContext`] -- Per-document transcription settings
//! - [`DocumentSnapshot`] -- One document part as JSON

pub mod document;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod line;

pub use document::{
    DocumentContext, DocumentSnapshot, TranscriptionLayer, DEFAULT_BLANK_SEPARATOR,
};
pub use error::TypeError;
pub use geometry::{Baseline, Point};
pub use ids::{BlockId, LayerId, LineId, PartId, TypologyId};
pub use line::{Line, LineTranscription};
