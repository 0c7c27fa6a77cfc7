//! Merge engine for segmented lines.
//!
//! Combines a caller-selected set of line fragments into the description of
//! a single line. The reading order is inferred from baseline geometry by
//! `lm-order`; attributes are then merged in that order:
//!
//! - baselines are spliced end to end,
//! - the typology is a majority vote with a caller-order tie-break,
//! - transcriptions are joined per layer with the document's separator.
//!
//! # Key Types
//!
//! - [`LineMerger`] / [`merge_lines`] -- The merge entry points
//! - [`MergedLineDescriptor`] / [`MergeOutcome`] -- What the caller persists
//! - [`MergeConfig`] -- Sentinel costs and candidate checks, loadable from TOML
//! - [`LineSource`] -- Read-only access to lines for id-based merges
//! - [`MergeError`] -- Invalid candidates, degenerate matchings, solver failures

pub mod config;
pub mod descriptor;
pub mod error;
pub mod merger;
pub mod source;
pub mod transcription;
pub mod typology;

pub use config::MergeConfig;
pub use descriptor::{concat_baselines, MergeOutcome, MergedLineDescriptor};
pub use error::{MergeError, MergeResult};
pub use merger::{merge_lines, LineMerger};
pub use source::LineSource;
pub use transcription::fuse_transcriptions;
pub use typology::{resolve_typology, tally_typologies, TypologyTally};
