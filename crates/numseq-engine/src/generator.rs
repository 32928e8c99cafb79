//! Orchestrating generator: validate, sample, plan, compose.

use nalgebra::DMatrix;
use numseq_core::{Corpus, Digit, ErrorInfo, LabelGroups, RngHandle, SeqError};

use crate::compose::compose;
use crate::sampler::{sample_glyph, GlyphTransform};
use crate::spacing::{self, SpacingAnchor, SpacingConfig, SpacingRange};

/// Substream identifier for glyph-index draws.
const SAMPLER_SUBSTREAM: u64 = 0;
/// Substream identifier for gap-width draws.
const SPACING_SUBSTREAM: u64 = 1;

/// Renders digit sequences against one corpus and spacing policy.
///
/// Holds the corpus, its label grouping and two RNG substreams for the
/// lifetime of the instance; nothing else persists across `generate` calls.
/// The grouping is read-only after construction. Instances are not shared
/// between threads; concurrent generation means one generator (and one RNG
/// stream) per thread, with any shared cache writes serialized externally.
pub struct SequenceGenerator {
    corpus: Corpus,
    groups: LabelGroups,
    config: SpacingConfig,
    transform: Option<GlyphTransform>,
    sampler_rng: RngHandle,
    spacing_rng: RngHandle,
}

impl SequenceGenerator {
    /// Creates a generator over `corpus` with a prebuilt grouping.
    ///
    /// Sampling and spacing draw from independent substreams of `seed`, so a
    /// seeded generator replays identical index and width draws.
    pub fn new(corpus: Corpus, groups: LabelGroups, config: SpacingConfig, seed: u64) -> Self {
        Self {
            corpus,
            groups,
            config,
            transform: None,
            sampler_rng: RngHandle::substream(seed, SAMPLER_SUBSTREAM),
            spacing_rng: RngHandle::substream(seed, SPACING_SUBSTREAM),
        }
    }

    /// Installs the optional glyph transform collaborator.
    pub fn with_transform(mut self, transform: GlyphTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Spacing policy this generator was built with.
    pub fn config(&self) -> SpacingConfig {
        self.config
    }

    /// Generates one sequence image of shape `(corpus height, image_width)`.
    ///
    /// Values are nominally in `[0, 1]`; after a transform, renormalization
    /// rounding may leave marginal excursions outside that range. Validation
    /// runs before any RNG draw, so a rejected request never advances the
    /// random streams. An inverted spacing range is unrepresentable here:
    /// [`SpacingRange::new`] already rejects it.
    pub fn generate(
        &mut self,
        digits: &[Digit],
        range: SpacingRange,
        image_width: usize,
    ) -> Result<DMatrix<f32>, SeqError> {
        self.validate(digits, image_width)?;

        let glyphs = digits
            .iter()
            .map(|&digit| {
                sample_glyph(
                    &self.corpus,
                    &self.groups,
                    digit,
                    &mut self.sampler_rng,
                    self.transform.as_ref(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let plan = spacing::plan(
            self.config,
            digits.len(),
            range,
            image_width,
            self.corpus.width(),
            &mut self.spacing_rng,
        )?;

        compose(&glyphs, &plan, image_width)
    }

    fn validate(&self, digits: &[Digit], image_width: usize) -> Result<(), SeqError> {
        if digits.is_empty() {
            return Err(SeqError::InvalidConfiguration(ErrorInfo::new(
                "empty-digit-sequence",
                "at least one digit is required",
            )));
        }
        if image_width == 0 {
            return Err(SeqError::InvalidConfiguration(ErrorInfo::new(
                "zero-image-width",
                "the output image width must be positive",
            )));
        }
        if self.config.anchor == SpacingAnchor::Between && digits.len() == 1 {
            return Err(SeqError::InvalidConfiguration(
                ErrorInfo::new(
                    "between-single-digit",
                    "`between` spacing is meaningless for a single-digit sequence",
                )
                .with_hint("request at least two digits or switch to `edge` spacing"),
            ));
        }
        for &digit in digits {
            self.groups.lookup(digit)?;
        }
        Ok(())
    }
}

/// Output filename for the save collaborator: `seq_<digits>.<format>`.
pub fn sequence_filename(digits: &[Digit], format: &str) -> String {
    let joined: String = digits.iter().map(|digit| digit.to_string()).collect();
    format!("seq_{joined}.{format}")
}
