//! Digit labels and the read-only glyph corpus.

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SeqError};

/// Number of distinct digit labels (0 through 9).
pub const LABEL_CARDINALITY: usize = 10;

/// A single digit value constrained to the closed range 0-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, rejecting values above 9.
    pub fn new(value: u8) -> Result<Self, SeqError> {
        if usize::from(value) >= LABEL_CARDINALITY {
            return Err(SeqError::InvalidConfiguration(
                ErrorInfo::new("digit-out-of-range", "digit values must lie in 0-9")
                    .with_context("value", value.to_string()),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw label value.
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = SeqError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable corpus of labeled handwritten-digit glyphs.
///
/// Every glyph is a height x width matrix of `f32` values in `[0, 1]` with
/// `1.0` as background white; all glyphs share the same shape, recorded once
/// at construction. The corpus is owned here and referenced read-only by the
/// grouping structure and the sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    glyphs: Vec<DMatrix<f32>>,
    labels: Vec<u8>,
    height: usize,
    width: usize,
}

impl Corpus {
    /// Builds a corpus from parallel glyph and label vectors.
    ///
    /// Fails when the vectors disagree in length, the corpus is empty, the
    /// glyph shapes are not uniform, or a label exceeds 9.
    pub fn new(glyphs: Vec<DMatrix<f32>>, labels: Vec<u8>) -> Result<Self, SeqError> {
        if glyphs.len() != labels.len() {
            return Err(SeqError::Corpus(
                ErrorInfo::new("corpus-size-mismatch", "glyph and label counts do not match")
                    .with_context("glyphs", glyphs.len().to_string())
                    .with_context("labels", labels.len().to_string()),
            ));
        }
        let first = glyphs.first().ok_or_else(|| {
            SeqError::Corpus(ErrorInfo::new(
                "corpus-empty",
                "a corpus must contain at least one glyph",
            ))
        })?;
        let (height, width) = first.shape();
        for (index, glyph) in glyphs.iter().enumerate() {
            if glyph.shape() != (height, width) {
                return Err(SeqError::Corpus(
                    ErrorInfo::new("corpus-shape-mismatch", "all glyphs must share one shape")
                        .with_context("index", index.to_string())
                        .with_context("expected", format!("{height}x{width}"))
                        .with_context(
                            "found",
                            format!("{}x{}", glyph.nrows(), glyph.ncols()),
                        ),
                ));
            }
        }
        if let Some(position) = labels
            .iter()
            .position(|&label| usize::from(label) >= LABEL_CARDINALITY)
        {
            return Err(SeqError::Corpus(
                ErrorInfo::new("corpus-label-out-of-range", "labels must lie in 0-9")
                    .with_context("index", position.to_string())
                    .with_context("label", labels[position].to_string()),
            ));
        }
        Ok(Self {
            glyphs,
            labels,
            height,
            width,
        })
    }

    /// Returns the number of glyphs in the corpus.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` when the corpus holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Uniform glyph height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Uniform glyph width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the glyph stored at `index`, if any.
    pub fn glyph(&self, index: usize) -> Option<&DMatrix<f32>> {
        self.glyphs.get(index)
    }

    /// Returns the label vector, index-aligned with the glyphs.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }
}
