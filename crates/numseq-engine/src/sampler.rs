//! Uniform glyph sampling and the optional transform seam.

use nalgebra::DMatrix;
use numseq_core::{Corpus, Digit, ErrorInfo, LabelGroups, RngHandle, SeqError};
use rand::distributions::{Distribution, Uniform};

/// Opaque glyph-to-glyph filter supplied by the caller.
///
/// The engine treats it as a single capability: pixel values coming out of
/// it are unconstrained and get renormalized before compositing.
pub type GlyphTransform = Box<dyn Fn(&DMatrix<f32>) -> DMatrix<f32>>;

/// Draws one corpus index for `digit`, uniformly over its label group.
///
/// The draw is a single uniform-integer sample over the group length; cost
/// does not depend on how many corpus entries share the label.
pub fn sample_index(
    groups: &LabelGroups,
    digit: Digit,
    rng: &mut RngHandle,
) -> Result<usize, SeqError> {
    let group = groups.lookup(digit)?;
    let slot = Uniform::from(0..group.len()).sample(rng);
    Ok(group[slot])
}

/// Samples one glyph for `digit`, applying the transform when configured.
///
/// With a transform the result is min-max renormalized over the glyph's own
/// value range, since the filter may shift or invert intensities arbitrarily.
/// Without one the corpus glyph is returned unchanged.
pub fn sample_glyph(
    corpus: &Corpus,
    groups: &LabelGroups,
    digit: Digit,
    rng: &mut RngHandle,
    transform: Option<&GlyphTransform>,
) -> Result<DMatrix<f32>, SeqError> {
    let index = sample_index(groups, digit, rng)?;
    let glyph = corpus.glyph(index).ok_or_else(|| {
        SeqError::InternalConsistency(
            ErrorInfo::new(
                "group-index-out-of-bounds",
                "label group references an index outside the corpus",
            )
            .with_context("index", index.to_string())
            .with_context("corpus_len", corpus.len().to_string()),
        )
    })?;
    match transform {
        Some(filter) => Ok(normalize_glyph(&filter(glyph))),
        None => Ok(glyph.clone()),
    }
}

/// Min-max rescales a glyph into `[0, 1]` over its own value range.
///
/// A constant glyph has no range to stretch and collapses to all zeros.
pub fn normalize_glyph(glyph: &DMatrix<f32>) -> DMatrix<f32> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &value in glyph.iter() {
        min = min.min(value);
        max = max.max(value);
    }
    let span = max - min;
    if !span.is_finite() || span <= f32::EPSILON {
        return DMatrix::zeros(glyph.nrows(), glyph.ncols());
    }
    glyph.map(|value| (value - min) / span)
}
