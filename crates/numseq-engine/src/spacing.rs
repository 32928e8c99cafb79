//! Gap-width planning under the four spacing policies.

use numseq_core::{ErrorInfo, RngHandle, SeqError};
use rand::distributions::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

/// How gap widths are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingKind {
    /// One analytically computed width shared by every gap.
    Fixed,
    /// Independent uniform draws per gap.
    Variable,
}

/// Which of the `n + 1` gap slots receive width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingAnchor {
    /// Gaps between digits and at both image edges.
    Edge,
    /// Interior gaps only; the edge slots stay at zero.
    Between,
}

/// Spacing policy: kind plus anchor, immutable per generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingConfig {
    /// Fixed or variable width selection.
    #[serde(rename = "type")]
    pub kind: SpacingKind,
    /// Edge or between slot assignment.
    #[serde(rename = "subtype")]
    pub anchor: SpacingAnchor,
}

/// Inclusive `[min, max]` bounds on a single gap width, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingRange {
    min: usize,
    max: usize,
}

impl SpacingRange {
    /// Creates a range, rejecting `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, SeqError> {
        if min > max {
            return Err(SeqError::InvalidConfiguration(
                ErrorInfo::new("spacing-range-inverted", "spacing minimum exceeds maximum")
                    .with_context("min", min.to_string())
                    .with_context("max", max.to_string()),
            ));
        }
        Ok(Self { min, max })
    }

    /// Lower inclusive bound.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Upper inclusive bound.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Whether `width` lies inside the range.
    pub fn contains(&self, width: usize) -> bool {
        (self.min..=self.max).contains(&width)
    }
}

/// Ordered widths for the `n + 1` gap slots around `n` digits.
///
/// `exact` marks plans whose widths already account for the full image
/// width (fixed policies); the compositor must not rescale those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacingPlan {
    widths: Vec<usize>,
    exact: bool,
}

impl SpacingPlan {
    /// Gap widths, positionally aligned before digit 1 through after digit n.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Whether the plan guarantees the exact target width by construction.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Sum of all gap widths.
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }
}

/// Plans the gap widths for `num_digits` digits of uniform `glyph_width`
/// inside an image `image_width` pixels wide.
///
/// Fixed policies divide the leftover width evenly and fail loudly on any
/// remainder; silent truncation would shift the output width away from the
/// caller's request. Variable policies draw each width uniformly from the
/// inclusive range and leave exactness to the compositor's rescale.
pub fn plan(
    config: SpacingConfig,
    num_digits: usize,
    range: SpacingRange,
    image_width: usize,
    glyph_width: usize,
    rng: &mut RngHandle,
) -> Result<SpacingPlan, SeqError> {
    if num_digits == 0 {
        return Err(SeqError::InvalidConfiguration(ErrorInfo::new(
            "empty-digit-sequence",
            "at least one digit is required",
        )));
    }
    if config.anchor == SpacingAnchor::Between && num_digits == 1 {
        return Err(SeqError::InvalidConfiguration(
            ErrorInfo::new(
                "between-single-digit",
                "`between` spacing is meaningless for a single-digit sequence",
            )
            .with_hint("request at least two digits or switch to `edge` spacing"),
        ));
    }

    match config.kind {
        SpacingKind::Fixed => fixed_plan(config.anchor, num_digits, range, image_width, glyph_width),
        SpacingKind::Variable => Ok(variable_plan(config.anchor, num_digits, range, rng)),
    }
}

fn fixed_plan(
    anchor: SpacingAnchor,
    num_digits: usize,
    range: SpacingRange,
    image_width: usize,
    glyph_width: usize,
) -> Result<SpacingPlan, SeqError> {
    let total_glyph_width = num_digits * glyph_width;
    let available = image_width.checked_sub(total_glyph_width).ok_or_else(|| {
        SeqError::InvalidConfiguration(
            ErrorInfo::new(
                "insufficient-width",
                "the image width cannot hold the requested glyphs",
            )
            .with_context("image_width", image_width.to_string())
            .with_context("total_glyph_width", total_glyph_width.to_string()),
        )
    })?;

    let gap_count = match anchor {
        SpacingAnchor::Edge => num_digits + 1,
        SpacingAnchor::Between => num_digits - 1,
    };
    let remainder = available % gap_count;
    if remainder != 0 {
        return Err(SeqError::IndivisibleWidth(
            ErrorInfo::new(
                "uneven-gap-division",
                "available pixels do not divide evenly across the gap slots",
            )
            .with_context("available", available.to_string())
            .with_context("gap_count", gap_count.to_string())
            .with_context("remainder", remainder.to_string())
            .with_hint("adjust the image width or the spacing subtype"),
        ));
    }
    let gap = available / gap_count;
    if !range.contains(gap) {
        return Err(SeqError::SpacingOutOfRange(
            ErrorInfo::new(
                "fixed-gap-out-of-range",
                "the computed gap width falls outside the requested range",
            )
            .with_context("gap", gap.to_string())
            .with_context("min", range.min().to_string())
            .with_context("max", range.max().to_string()),
        ));
    }

    let mut widths = vec![gap; num_digits + 1];
    if anchor == SpacingAnchor::Between {
        widths[0] = 0;
        widths[num_digits] = 0;
    }
    Ok(SpacingPlan {
        widths,
        exact: true,
    })
}

fn variable_plan(
    anchor: SpacingAnchor,
    num_digits: usize,
    range: SpacingRange,
    rng: &mut RngHandle,
) -> SpacingPlan {
    let dist = Uniform::new_inclusive(range.min(), range.max());
    let widths = match anchor {
        SpacingAnchor::Edge => (0..=num_digits).map(|_| dist.sample(rng)).collect(),
        SpacingAnchor::Between => {
            // One draw per interior slot; the edges stay at zero.
            let mut widths = Vec::with_capacity(num_digits + 1);
            widths.push(0);
            widths.extend((1..num_digits).map(|_| dist.sample(rng)));
            widths.push(0);
            widths
        }
    };
    SpacingPlan {
        widths,
        exact: false,
    }
}
