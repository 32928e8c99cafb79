//! JSON run configuration for the CLI.

use std::fs;
use std::path::Path;

use numseq_core::{ErrorInfo, SeqError};
use numseq_engine::{SpacingAnchor, SpacingConfig, SpacingKind};
use serde::Deserialize;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpg,
    Jpeg,
}

impl OutputFormat {
    /// File extension used in the `seq_<digits>.<format>` convention.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpg | OutputFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImageOptions {
    /// Whether to run sampled glyphs through the transform pipeline.
    pub transform: bool,
}

/// Run configuration loaded from a JSON file.
///
/// All three sections are required when a file is supplied, mirroring the
/// strictness of the generate call surface; [`RunConfig::default`] covers
/// the no-file case.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub image: ImageOptions,
    pub spacing: SpacingConfig,
    pub output_format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            image: ImageOptions { transform: false },
            spacing: SpacingConfig {
                kind: SpacingKind::Variable,
                anchor: SpacingAnchor::Between,
            },
            output_format: OutputFormat::Png,
        }
    }
}

impl RunConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, SeqError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            SeqError::Io(
                ErrorInfo::new("config-read", "failed to read the configuration file")
                    .with_context("path", path.display().to_string())
                    .with_context("source", err.to_string()),
            )
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            SeqError::InvalidConfiguration(
                ErrorInfo::new("config-decode", "the configuration file is not valid")
                    .with_context("path", path.display().to_string())
                    .with_context("source", err.to_string())
                    .with_hint(
                        "expected {\"image\": {..}, \"spacing\": {..}, \"output_format\": ..}",
                    ),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_decodes() {
        let raw = r#"{
            "image": {"transform": true},
            "spacing": {"type": "fixed", "subtype": "edge"},
            "output_format": "jpeg"
        }"#;
        let config: RunConfig = serde_json::from_str(raw).unwrap();
        assert!(config.image.transform);
        assert_eq!(config.spacing.kind, SpacingKind::Fixed);
        assert_eq!(config.spacing.anchor, SpacingAnchor::Edge);
        assert_eq!(config.output_format, OutputFormat::Jpeg);
    }

    #[test]
    fn missing_sections_are_rejected() {
        let missing_spacing = r#"{"image": {"transform": false}, "output_format": "png"}"#;
        assert!(serde_json::from_str::<RunConfig>(missing_spacing).is_err());

        let missing_transform =
            r#"{"image": {}, "spacing": {"type": "fixed", "subtype": "edge"}, "output_format": "png"}"#;
        assert!(serde_json::from_str::<RunConfig>(missing_transform).is_err());
    }

    #[test]
    fn unsupported_formats_are_rejected() {
        let raw = r#"{
            "image": {"transform": false},
            "spacing": {"type": "fixed", "subtype": "edge"},
            "output_format": "bmp"
        }"#;
        assert!(serde_json::from_str::<RunConfig>(raw).is_err());
    }

    #[test]
    fn defaults_match_the_packaged_configuration() {
        let config = RunConfig::default();
        assert!(!config.image.transform);
        assert_eq!(config.spacing.kind, SpacingKind::Variable);
        assert_eq!(config.spacing.anchor, SpacingAnchor::Between);
        assert_eq!(config.output_format, OutputFormat::Png);
    }
}
