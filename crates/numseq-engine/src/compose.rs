//! Gap/glyph interleaving and the width-correction resample.

use nalgebra::DMatrix;
use numseq_core::{ErrorInfo, SeqError};

use crate::spacing::SpacingPlan;

/// Composites glyphs and planned gaps into one raster of `target_width`.
///
/// The buffer is assembled strictly left to right as gap[0], glyph[0],
/// gap[1], ..., glyph[n-1], gap[n]; gaps are background-white (all ones)
/// blocks of the shared glyph height. For an exact (fixed-policy) plan the
/// assembled width must already equal `target_width`; any mismatch is an
/// internal invariant violation, never silently resized. For an inexact
/// (variable-policy) plan the buffer is resampled horizontally to the target
/// width, which may compress or stretch content; that is the documented cost
/// of variable spacing.
pub fn compose(
    glyphs: &[DMatrix<f32>],
    plan: &SpacingPlan,
    target_width: usize,
) -> Result<DMatrix<f32>, SeqError> {
    let first = glyphs.first().ok_or_else(|| {
        SeqError::InvalidConfiguration(ErrorInfo::new(
            "empty-digit-sequence",
            "at least one glyph is required to compose a sequence",
        ))
    })?;
    if plan.widths().len() != glyphs.len() + 1 {
        return Err(SeqError::InternalConsistency(
            ErrorInfo::new(
                "plan-length-mismatch",
                "a plan must carry exactly one more slot than there are glyphs",
            )
            .with_context("plan_slots", plan.widths().len().to_string())
            .with_context("glyphs", glyphs.len().to_string()),
        ));
    }

    let height = first.nrows();
    let mut assembled_width = plan.total();
    for glyph in glyphs {
        if glyph.nrows() != height {
            return Err(SeqError::InternalConsistency(
                ErrorInfo::new("glyph-height-mismatch", "glyph heights must be uniform")
                    .with_context("expected", height.to_string())
                    .with_context("found", glyph.nrows().to_string()),
            ));
        }
        assembled_width += glyph.ncols();
    }

    // Gaps are background white, so prefill and copy only the glyphs in.
    let mut buffer = DMatrix::from_element(height, assembled_width, 1.0f32);
    let mut offset = 0;
    for (glyph, &gap) in glyphs.iter().zip(plan.widths()) {
        offset += gap;
        buffer
            .view_mut((0, offset), (height, glyph.ncols()))
            .copy_from(glyph);
        offset += glyph.ncols();
    }

    if plan.is_exact() {
        if assembled_width != target_width {
            return Err(SeqError::InternalConsistency(
                ErrorInfo::new(
                    "exact-width-mismatch",
                    "a fixed-spacing buffer must already match the target width",
                )
                .with_context("assembled", assembled_width.to_string())
                .with_context("target", target_width.to_string()),
            ));
        }
        return Ok(buffer);
    }
    Ok(resize_width(&buffer, target_width))
}

/// Resamples `image` horizontally to `target_width` with linear
/// interpolation; the height is preserved unchanged.
pub fn resize_width(image: &DMatrix<f32>, target_width: usize) -> DMatrix<f32> {
    let (height, source_width) = image.shape();
    if source_width == target_width || source_width == 0 {
        return image.clone();
    }
    let scale = source_width as f32 / target_width as f32;
    DMatrix::from_fn(height, target_width, |row, col| {
        // Map the output column centre back into source coordinates.
        let x = ((col as f32 + 0.5) * scale - 0.5).clamp(0.0, (source_width - 1) as f32);
        let left = x.floor() as usize;
        let right = (left + 1).min(source_width - 1);
        let frac = x - left as f32;
        image[(row, left)] * (1.0 - frac) + image[(row, right)] * frac
    })
}
