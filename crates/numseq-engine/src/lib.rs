//! Sequence-assembly engine for numseq.
//!
//! Turns a digit request into one fixed-height raster: sample one glyph per
//! digit from the corpus, plan the gap widths under the configured spacing
//! policy, interleave gaps and glyphs left to right, and rescale to the
//! requested width when the plan is inexact. Single-threaded, CPU-only; all
//! I/O lives in collaborator crates.

pub mod compose;
pub mod generator;
pub mod sampler;
pub mod spacing;

pub use compose::{compose, resize_width};
pub use generator::{sequence_filename, SequenceGenerator};
pub use sampler::{normalize_glyph, sample_glyph, sample_index, GlyphTransform};
pub use spacing::{plan, SpacingAnchor, SpacingConfig, SpacingKind, SpacingPlan, SpacingRange};
