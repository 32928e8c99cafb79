//! Image-writer collaborator: float raster out to PNG or JPEG.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use nalgebra::DMatrix;
use numseq_core::{Digit, ErrorInfo, SeqError};
use numseq_engine::sequence_filename;

use crate::config::OutputFormat;

/// Saves `image` under `out_dir` as `seq_<digits>.<format>`.
///
/// Values are clamped to `[0, 1]` here for u8 encoding only; the in-memory
/// raster keeps any marginal excursions from transform renormalization.
pub fn save_sequence(
    image: &DMatrix<f32>,
    digits: &[Digit],
    format: OutputFormat,
    out_dir: &Path,
) -> Result<PathBuf, SeqError> {
    let (height, width) = image.shape();
    let mut gray = GrayImage::new(width as u32, height as u32);
    for row in 0..height {
        for col in 0..width {
            let value = (image[(row, col)].clamp(0.0, 1.0) * 255.0).round() as u8;
            gray.put_pixel(col as u32, row as u32, Luma([value]));
        }
    }

    let path = out_dir.join(sequence_filename(digits, format.extension()));
    gray.save_with_format(&path, format.image_format())
        .map_err(|err| {
            SeqError::Io(
                ErrorInfo::new("image-save", "failed to encode or write the sequence image")
                    .with_context("path", path.display().to_string())
                    .with_context("source", err.to_string()),
            )
        })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn saves_a_png_with_the_expected_name_and_shape() {
        let dir = tempdir().unwrap();
        let mut raster = DMatrix::from_element(6, 10, 1.0f32);
        raster[(2, 3)] = 0.0;
        let digits = vec![Digit::new(4).unwrap(), Digit::new(2).unwrap()];

        let path = save_sequence(&raster, &digits, OutputFormat::Png, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "seq_42.png");

        let reloaded = image::open(&path).unwrap().to_luma8();
        assert_eq!((reloaded.width(), reloaded.height()), (10, 6));
        assert_eq!(reloaded.get_pixel(3, 2).0[0], 0);
        assert_eq!(reloaded.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn encoding_clamps_out_of_range_values() {
        let dir = tempdir().unwrap();
        let mut raster = DMatrix::from_element(2, 2, 0.5f32);
        raster[(0, 0)] = -0.2;
        raster[(1, 1)] = 1.3;
        let digits = vec![Digit::new(0).unwrap()];

        let path = save_sequence(&raster, &digits, OutputFormat::Png, dir.path()).unwrap();
        let reloaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(reloaded.get_pixel(0, 0).0[0], 0);
        assert_eq!(reloaded.get_pixel(1, 1).0[0], 255);
    }
}
